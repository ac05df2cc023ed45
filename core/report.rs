use console::Style;
use std::io::Write;
use std::path::Path;

/// Formats findings with file/line context and optional ANSI coloring.
///
/// Whether color is used is decided once by the driver at startup and
/// injected here; nothing queries the terminal mid-pipeline.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn fix(&self, path: &Path, line: Option<usize>, message: &str) {
        println!(
            "{} {} {}",
            self.paint("[FIX]", Style::new().green().bold()),
            self.location(path, line),
            message
        );
    }

    pub fn warning(&self, path: &Path, line: Option<usize>, message: &str) {
        println!(
            "{} {} {}",
            self.paint("[WARN]", Style::new().yellow().bold()),
            self.location(path, line),
            message
        );
    }

    pub fn error(&self, path: &Path, line: Option<usize>, message: &str) {
        eprintln!(
            "{} {} {}",
            self.paint("[ERROR]", Style::new().red().bold()),
            self.location(path, line),
            message
        );
    }

    /// One mark per file processed; purely cosmetic.
    pub fn progress(&self) {
        print!(".");
        let _ = std::io::stdout().flush();
    }

    pub fn progress_done(&self) {
        println!();
    }

    fn location(&self, path: &Path, line: Option<usize>) -> String {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => path.display().to_string(),
        };
        let name = match line {
            Some(line) => format!("{}:{}", name, line),
            None => name,
        };
        let highlighted = self.paint(&name, Style::new().cyan());
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                let dir = format!("{}{}", dir.display(), std::path::MAIN_SEPARATOR);
                format!("{}{}", self.paint(&dir, Style::new().dim()), highlighted)
            }
            _ => highlighted,
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Per-file reporting sink handed to each task invocation.
///
/// The sink also carries the per-task error flag: `error` always sets it,
/// `fix` sets it only in read-only mode (a reported-but-unfixed finding is
/// a failure only when nothing will actually be written), `warning` never
/// does. The pipeline resets the flag by handing each task a fresh sink.
pub struct FileSink<'a> {
    reporter: &'a Reporter,
    path: &'a Path,
    read_only: bool,
    errored: bool,
}

impl<'a> FileSink<'a> {
    pub fn new(reporter: &'a Reporter, path: &'a Path, read_only: bool) -> Self {
        Self {
            reporter,
            path,
            read_only,
            errored: false,
        }
    }

    pub fn fix(&mut self, message: &str, line: Option<usize>) {
        self.reporter.fix(self.path, line, message);
        if self.read_only {
            self.errored = true;
        }
    }

    pub fn warning(&mut self, message: &str, line: Option<usize>) {
        self.reporter.warning(self.path, line, message);
    }

    pub fn error(&mut self, message: &str, line: Option<usize>) {
        self.reporter.error(self.path, line, message);
        self.errored = true;
    }

    pub fn errored(&self) -> bool {
        self.errored
    }
}
