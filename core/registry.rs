use crate::pattern::NamePattern;
use crate::report::FileSink;

/// A single text-level check or fix.
///
/// Tasks receive the current file content and a reporting sink bound to the
/// file being processed. They may edit the content in place and report
/// findings through the sink. Edits are only kept if the task leaves the
/// sink clean; the pipeline discards them otherwise.
pub trait Task {
    fn name(&self) -> &'static str;

    fn apply(&self, content: &mut String, sink: &mut FileSink<'_>);
}

pub struct RegisteredTask {
    pub task: Box<dyn Task>,
    /// Gates which files the task runs on. `None` means every file
    /// reaching the pipeline.
    pub pattern: Option<NamePattern>,
}

/// Ordered, append-only list of tasks. Order is significant: later tasks
/// see the successful edits of earlier ones.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: Vec<RegisteredTask>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, task: Box<dyn Task>) {
        self.tasks.push(RegisteredTask {
            task,
            pattern: None,
        });
    }

    pub fn register_for(&mut self, task: Box<dyn Task>, pattern: NamePattern) {
        self.tasks.push(RegisteredTask {
            task,
            pattern: Some(pattern),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredTask> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
