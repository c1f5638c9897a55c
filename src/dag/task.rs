// src/dag/task.rs

use std::fmt;
use std::str::FromStr;

use crate::errors::ElmwatchError;

/// The tasks elmwatch can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    /// One-time compiler toolchain preparation.
    Init,
    /// Compile the source and write the renamed output.
    Build,
    /// Build once, then rebuild whenever a watched file changes.
    Default,
}

impl TaskKind {
    pub const ALL: [TaskKind; 3] = [TaskKind::Init, TaskKind::Build, TaskKind::Default];

    pub fn name(self) -> &'static str {
        match self {
            TaskKind::Init => "init",
            TaskKind::Build => "build",
            TaskKind::Default => "default",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskKind {
    type Err = ElmwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|k| k.name() == s.trim())
            .ok_or_else(|| ElmwatchError::TaskNotFound(s.to_string()))
    }
}

/// Declaration of a task and the tasks it must run after.
#[derive(Debug, Clone)]
pub struct TaskDecl {
    pub kind: TaskKind,
    pub after: Vec<TaskKind>,
}

impl TaskDecl {
    pub fn new(kind: TaskKind, after: &[TaskKind]) -> Self {
        Self {
            kind,
            after: after.to_vec(),
        }
    }
}

/// The built-in task table: `default` after `build` after `init`.
pub fn standard_decls() -> Vec<TaskDecl> {
    vec![
        TaskDecl::new(TaskKind::Init, &[]),
        TaskDecl::new(TaskKind::Build, &[TaskKind::Init]),
        TaskDecl::new(TaskKind::Default, &[TaskKind::Build]),
    ]
}
