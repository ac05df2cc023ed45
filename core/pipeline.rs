use crate::pattern::PatternSet;
use crate::registry::TaskRegistry;
use crate::report::{FileSink, Reporter};
use crate::walker;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Report findings without rewriting; unfixed fix-class findings fail
    /// the run in this mode.
    pub read_only: bool,
    /// Emit one progress mark per file processed.
    pub progress: bool,
}

/// Aggregate of one full walk. `success()` is the logical AND over all
/// files, true when zero files matched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub scanned: usize,
    pub rewritten: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

struct FileOutcome {
    rewritten: bool,
    failed: bool,
}

/// Runs every registered task, in registration order, against every file
/// the walker yields, one file at a time.
pub fn run(
    root: &Path,
    accept: &PatternSet,
    ignore: &PatternSet,
    registry: &TaskRegistry,
    reporter: &Reporter,
    options: RunOptions,
) -> Result<RunSummary> {
    if !root.exists() {
        anyhow::bail!("Path not found: {}", root.display());
    }
    let mut summary = RunSummary::default();
    for path in walker::scan(root, accept, ignore) {
        summary.scanned += 1;
        if options.progress {
            reporter.progress();
        }
        let outcome = process_file(&path, root, registry, reporter, options);
        summary.rewritten += outcome.rewritten as usize;
        summary.failed += outcome.failed as usize;
    }
    if options.progress && summary.scanned > 0 {
        reporter.progress_done();
    }
    Ok(summary)
}

fn process_file(
    path: &Path,
    root: &Path,
    registry: &TaskRegistry,
    reporter: &Reporter,
    options: RunOptions,
) -> FileOutcome {
    let rel = relative_to_root(path, root);
    let failed = FileOutcome {
        rewritten: false,
        failed: true,
    };

    let orig = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            reporter.error(&rel, None, &format!("read failed: {}", e));
            return failed;
        }
    };
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => {
            reporter.error(&rel, None, "path has no file name");
            return failed;
        }
    };

    let mut last = orig.clone();
    let mut file_error = false;
    for entry in registry.iter() {
        if let Some(pattern) = &entry.pattern {
            if !pattern.matches(&name) {
                continue;
            }
        }
        let mut working = last.clone();
        let mut sink = FileSink::new(reporter, &rel, options.read_only);
        entry.task.apply(&mut working, &mut sink);
        if sink.errored() {
            // This task's edits are dropped; later tasks and the final
            // writeback still see the last good content.
            file_error = true;
        } else {
            last = working;
        }
    }

    let mut rewritten = false;
    if last != orig && !options.read_only {
        if let Err(e) = write_atomic(path, &last) {
            reporter.error(&rel, None, &format!("write failed: {:#}", e));
            return failed;
        }
        rewritten = true;
    }
    FileOutcome {
        rewritten,
        failed: file_error,
    }
}

/// Root prefix stripped, leading separators trimmed; a single-file root
/// keeps its full path.
fn relative_to_root(path: &Path, root: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

/// Full-buffer write to a temp file in the same directory, then rename
/// over the original, so an interrupted run never leaves a half-written
/// file behind.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".srcfix_")
        .tempfile_in(parent)
        .with_context(|| format!("Failed to create temp file next to {}", path.display()))?;
    temp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
    temp.persist(path).map_err(|persist_error| {
        anyhow::anyhow!(
            "Failed to overwrite {} with temp file {}: {}",
            path.display(),
            persist_error.file.path().display(),
            persist_error.error
        )
    })?;
    Ok(())
}
