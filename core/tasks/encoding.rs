use crate::registry::Task;
use crate::report::FileSink;

/// Removes a leading U+FEFF byte order mark.
pub struct StripBom;

impl Task for StripBom {
    fn name(&self) -> &'static str {
        "strip-bom"
    }

    fn apply(&self, content: &mut String, sink: &mut FileSink<'_>) {
        if let Some(rest) = content.strip_prefix('\u{feff}') {
            *content = rest.to_string();
            sink.fix("byte order mark removed", Some(1));
        }
    }
}

/// Rejects control characters other than tab and newline. Check-only: it
/// never edits, so an offending file keeps flowing with its last good
/// content while the run is marked failed.
pub struct ControlChars;

impl Task for ControlChars {
    fn name(&self) -> &'static str {
        "control-chars"
    }

    fn apply(&self, content: &mut String, sink: &mut FileSink<'_>) {
        for (idx, line) in content.lines().enumerate() {
            // \r is the line-endings fixer's business, not an error here.
            if let Some(c) = line
                .chars()
                .find(|&c| c.is_control() && !matches!(c, '\t' | '\r'))
            {
                sink.error(
                    &format!("control character U+{:04X}", c as u32),
                    Some(idx + 1),
                );
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Reporter;
    use std::path::Path;

    fn apply(task: &dyn Task, input: &str, read_only: bool) -> (String, bool) {
        let reporter = Reporter::new(false);
        let mut sink = FileSink::new(&reporter, Path::new("test.txt"), read_only);
        let mut content = input.to_string();
        task.apply(&mut content, &mut sink);
        (content, sink.errored())
    }

    #[test]
    fn strips_a_leading_bom() {
        let (out, errored) = apply(&StripBom, "\u{feff}hello\n", false);
        assert_eq!(out, "hello\n");
        assert!(!errored);
    }

    #[test]
    fn bom_fix_fails_in_read_only_mode() {
        let (out, errored) = apply(&StripBom, "\u{feff}hello\n", true);
        assert_eq!(out, "hello\n");
        assert!(errored);
    }

    #[test]
    fn clean_content_is_untouched_and_unreported() {
        let (out, errored) = apply(&StripBom, "hello\n", true);
        assert_eq!(out, "hello\n");
        assert!(!errored);
    }

    #[test]
    fn interior_bom_is_not_a_leading_bom() {
        let (out, errored) = apply(&StripBom, "he\u{feff}llo\n", false);
        assert_eq!(out, "he\u{feff}llo\n");
        assert!(!errored);
    }

    #[test]
    fn control_character_is_an_error_in_any_mode() {
        let (out, errored) = apply(&ControlChars, "ok\nbad\u{0007}line\n", false);
        assert_eq!(out, "ok\nbad\u{0007}line\n");
        assert!(errored);
    }

    #[test]
    fn tab_and_newline_are_allowed() {
        let (_, errored) = apply(&ControlChars, "a\tb\nc\n", false);
        assert!(!errored);
    }

    #[test]
    fn carriage_return_is_not_flagged_here() {
        let (_, errored) = apply(&ControlChars, "dos line\r\n", false);
        assert!(!errored);
    }
}
