//! Command Executor port
//!
//! Defines the interface for running one external CLI process.

use async_trait::async_trait;
use devops_domain::CommandLine;
use thiserror::Error;

/// Captured result of a process that ran to completion (successfully or not).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// The process could not be run at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("{program}: command not found")]
    NotFound { program: String },

    #[error("failed to start {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("I/O error while running {program}: {message}")]
    Io { program: String, message: String },
}

/// Port for command execution
///
/// This port defines how the application layer runs external CLIs.
/// Implementations (adapters) live in the infrastructure layer. Each call
/// to [`run`](Self::run) starts at most one process and waits for it.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run the command and capture its output
    async fn run(&self, command: &CommandLine) -> Result<CommandOutput, ExecutorError>;

    /// Short adapter name for logs
    fn name(&self) -> &str {
        "process"
    }
}
