//! Process executor, the concrete implementation of [`CommandExecutor`].
//!
//! Runs the program directly (no shell) with stdin closed and stdout/stderr
//! captured. The child is bound to the lifetime of the caller:
//!
//! - `kill_on_drop`: dropping the dispatch future (host-level cancellation)
//!   kills the child
//! - Linux `PR_SET_PDEATHSIG`: the kernel sends SIGTERM to the child if this
//!   process dies without running destructors (SIGKILL, OOM kill)

use async_trait::async_trait;
use devops_application::ports::command_executor::{CommandExecutor, CommandOutput, ExecutorError};
use devops_domain::CommandLine;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Executor that spawns real processes on the local machine.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    fn command(line: &CommandLine) -> Command {
        let mut cmd = Command::new(&line.program);
        cmd.args(&line.args)
            .envs(&line.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &line.current_dir {
            cmd.current_dir(dir);
        }

        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        cmd
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn run(&self, line: &CommandLine) -> Result<CommandOutput, ExecutorError> {
        debug!("Spawning {} ({} args)", line.program, line.args.len());

        let output = Self::command(line).output().await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ExecutorError::NotFound {
                program: line.program.clone(),
            },
            std::io::ErrorKind::PermissionDenied => ExecutorError::Spawn {
                program: line.program.clone(),
                message: e.to_string(),
            },
            _ => ExecutorError::Io {
                program: line.program.clone(),
                message: e.to_string(),
            },
        })?;

        debug!("{} exited with {:?}", line.program, output.status.code());

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
