use crate::registry::Task;
use crate::report::FileSink;

/// Rewrites CRLF and lone CR line endings to LF.
pub struct NormalizeLineEndings;

impl Task for NormalizeLineEndings {
    fn name(&self) -> &'static str {
        "normalize-line-endings"
    }

    fn apply(&self, content: &mut String, sink: &mut FileSink<'_>) {
        let Some(pos) = content.find('\r') else {
            return;
        };
        let line = content[..pos].matches('\n').count() + 1;
        *content = content.replace("\r\n", "\n").replace('\r', "\n");
        sink.fix("normalized line endings to LF", Some(line));
    }
}

/// Replaces tab indentation with a fixed number of spaces. Registered with
/// a pattern that skips make files, whose recipes require tabs.
pub struct TabsToSpaces {
    width: usize,
}

impl TabsToSpaces {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Task for TabsToSpaces {
    fn name(&self) -> &'static str {
        "tabs-to-spaces"
    }

    fn apply(&self, content: &mut String, sink: &mut FileSink<'_>) {
        if !content.contains('\t') {
            return;
        }
        let spaces = " ".repeat(self.width);
        let mut parts: Vec<String> = Vec::new();
        let mut dirty = false;
        for (idx, segment) in content.split('\n').enumerate() {
            let indent_len = segment.len() - segment.trim_start_matches([' ', '\t']).len();
            let (indent, rest) = segment.split_at(indent_len);
            if indent.contains('\t') {
                dirty = true;
                sink.fix("tab indentation", Some(idx + 1));
                parts.push(format!("{}{}", indent.replace('\t', &spaces), rest));
            } else {
                parts.push(segment.to_string());
            }
        }
        if dirty {
            *content = parts.join("\n");
        }
    }
}

/// Strips trailing blanks from every line, keeping the line structure
/// intact. Registered with a pattern that skips Markdown, where two
/// trailing spaces are a hard break.
pub struct TrailingWhitespace;

impl Task for TrailingWhitespace {
    fn name(&self) -> &'static str {
        "trailing-whitespace"
    }

    fn apply(&self, content: &mut String, sink: &mut FileSink<'_>) {
        if content.is_empty() {
            return;
        }
        let mut parts = Vec::new();
        let mut dirty = false;
        for (idx, segment) in content.split('\n').enumerate() {
            let trimmed = segment.trim_end();
            if trimmed.len() != segment.len() {
                dirty = true;
                sink.fix("trailing whitespace", Some(idx + 1));
            }
            parts.push(trimmed);
        }
        if dirty {
            *content = parts.join("\n");
        }
    }
}

/// Collapses runs of blank lines into a single blank line.
pub struct CollapseBlankLines;

impl Task for CollapseBlankLines {
    fn name(&self) -> &'static str {
        "collapse-blank-lines"
    }

    fn apply(&self, content: &mut String, sink: &mut FileSink<'_>) {
        if content.is_empty() {
            return;
        }
        let mut out = String::with_capacity(content.len());
        let mut consecutive_blanks = 0;
        let mut first_line = true;
        let mut dirty = false;

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                consecutive_blanks += 1;
            } else {
                consecutive_blanks = 0;
            }

            if consecutive_blanks <= 1 {
                if !first_line {
                    out.push('\n');
                }
                out.push_str(line);
                first_line = false;
            } else {
                dirty = true;
                if consecutive_blanks == 2 {
                    sink.fix("multiple blank lines", Some(idx + 1));
                }
            }
        }

        if content.ends_with('\n') && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        if content.chars().all(|c| c == '\n') {
            out = "\n".to_string();
        }
        if dirty {
            *content = out;
        }
    }
}

/// Ensures the file ends with exactly one newline.
pub struct FinalNewline;

impl Task for FinalNewline {
    fn name(&self) -> &'static str {
        "final-newline"
    }

    fn apply(&self, content: &mut String, sink: &mut FileSink<'_>) {
        if content.is_empty() {
            return;
        }
        let body_len = content.trim_end_matches('\n').len();
        let trailing_newlines = content.len() - body_len;
        if trailing_newlines == 1 {
            return;
        }
        if trailing_newlines == 0 {
            let line = content.matches('\n').count() + 1;
            content.push('\n');
            sink.fix("missing final newline", Some(line));
        } else {
            let line = content[..body_len].matches('\n').count() + 1;
            content.truncate(body_len + 1);
            sink.fix("multiple trailing newlines", Some(line + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Reporter;
    use std::path::Path;

    fn apply(task: &dyn Task, input: &str) -> (String, bool) {
        let reporter = Reporter::new(false);
        let mut sink = FileSink::new(&reporter, Path::new("test.txt"), false);
        let mut content = input.to_string();
        task.apply(&mut content, &mut sink);
        (content, sink.errored())
    }

    #[test]
    fn crlf_becomes_lf() {
        let (out, _) = apply(&NormalizeLineEndings, "one\r\ntwo\r\nthree\n");
        assert_eq!(out, "one\ntwo\nthree\n");
    }

    #[test]
    fn lone_cr_becomes_lf() {
        let (out, _) = apply(&NormalizeLineEndings, "one\rtwo\r");
        assert_eq!(out, "one\ntwo\n");
    }

    #[test]
    fn lf_only_content_is_untouched() {
        let (out, _) = apply(&NormalizeLineEndings, "one\ntwo\n");
        assert_eq!(out, "one\ntwo\n");
    }

    #[test]
    fn leading_tabs_are_expanded() {
        let (out, _) = apply(&TabsToSpaces::new(4), "fn main() {\n\tbody();\n}\n");
        assert_eq!(out, "fn main() {\n    body();\n}\n");
    }

    #[test]
    fn mixed_indentation_is_expanded() {
        let (out, _) = apply(&TabsToSpaces::new(2), "\t  \tx\n");
        assert_eq!(out, "      x\n");
    }

    #[test]
    fn interior_tabs_are_left_alone() {
        let (out, _) = apply(&TabsToSpaces::new(4), "a\tb\n");
        assert_eq!(out, "a\tb\n");
    }

    #[test]
    fn trailing_blanks_are_stripped_per_line() {
        let (out, _) = apply(&TrailingWhitespace, "one  \ntwo\t\nthree\n");
        assert_eq!(out, "one\ntwo\nthree\n");
    }

    #[test]
    fn blank_line_structure_is_preserved() {
        let (out, _) = apply(&TrailingWhitespace, "one  \n\ntwo\n\n");
        assert_eq!(out, "one\n\ntwo\n\n");
    }

    #[test]
    fn trailing_whitespace_is_idempotent() {
        let (clean, _) = apply(&TrailingWhitespace, "one  \ntwo\n");
        let (again, _) = apply(&TrailingWhitespace, &clean);
        assert_eq!(clean, again);
    }

    #[test]
    fn blank_runs_collapse_to_one() {
        let (out, _) = apply(&CollapseBlankLines, "one\n\n\n\ntwo\n");
        assert_eq!(out, "one\n\ntwo\n");
    }

    #[test]
    fn single_blank_lines_are_kept() {
        let (out, _) = apply(&CollapseBlankLines, "one\n\ntwo\n");
        assert_eq!(out, "one\n\ntwo\n");
    }

    #[test]
    fn all_newline_content_collapses_to_one() {
        let (out, _) = apply(&CollapseBlankLines, "\n\n\n");
        assert_eq!(out, "\n");
    }

    #[test]
    fn missing_final_newline_is_added() {
        let (out, _) = apply(&FinalNewline, "one\ntwo");
        assert_eq!(out, "one\ntwo\n");
    }

    #[test]
    fn extra_trailing_newlines_are_trimmed() {
        let (out, _) = apply(&FinalNewline, "one\n\n\n");
        assert_eq!(out, "one\n");
    }

    #[test]
    fn exactly_one_newline_is_untouched() {
        let (out, errored) = apply(&FinalNewline, "one\n");
        assert_eq!(out, "one\n");
        assert!(!errored);
    }

    #[test]
    fn empty_content_is_untouched() {
        for task in [
            &NormalizeLineEndings as &dyn Task,
            &TrailingWhitespace,
            &CollapseBlankLines,
            &FinalNewline,
        ] {
            let (out, errored) = apply(task, "");
            assert_eq!(out, "");
            assert!(!errored);
        }
    }
}
