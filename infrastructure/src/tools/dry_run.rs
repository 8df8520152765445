//! Executor that prints instead of running.
//!
//! Used by `call --dry-run`: the dispatcher goes through lookup, validation,
//! configuration and safety checks as usual, and the "output" is the command
//! that would have run.

use async_trait::async_trait;
use devops_application::ports::command_executor::{CommandExecutor, CommandOutput, ExecutorError};
use devops_domain::CommandLine;
use devops_domain::devops::redact::redact_text;

#[derive(Debug, Clone, Default)]
pub struct DryRunExecutor;

#[async_trait]
impl CommandExecutor for DryRunExecutor {
    async fn run(&self, command: &CommandLine) -> Result<CommandOutput, ExecutorError> {
        Ok(CommandOutput::success(format!(
            "[dry-run] {}\n",
            redact_text(&command.display())
        )))
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}
