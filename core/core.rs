pub mod pattern;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod tasks;
pub mod walker;

pub use pattern::{NamePattern, PatternSet};
pub use pipeline::{RunOptions, RunSummary, run};
pub use registry::{RegisteredTask, Task, TaskRegistry};
pub use report::{FileSink, Reporter};

pub use walker::{CliArgs, Command, CompletionArgs, SrcfixArgs, accept_set, ignore_set, scan};

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
