//! Git command execution.
//!
//! [`CommandRunner`] is the seam the orchestrator drives; [`GitRunner`] is the
//! implementation that shells out to the system `git` binary through
//! [`tokio::process::Command`]. Tests substitute their own runner.

use crate::core::descriptor::RepositoryDescriptor;
use crate::core::error::{FleetError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Captured output of one finished process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a git subcommand against one repository.
///
/// Implementations must be safe to invoke many times concurrently. A non-zero
/// exit is not an error here; only failing to run the process at all is.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, repo: &RepositoryDescriptor, args: &[&str]) -> Result<CommandOutput>;
}

/// Runs the `git` binary found on `PATH` (or a configured one)
#[derive(Debug, Clone)]
pub struct GitRunner {
    program: String,
}

impl GitRunner {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for GitRunner {
    async fn run(&self, repo: &RepositoryDescriptor, args: &[&str]) -> Result<CommandOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(repo.git_args()).args(args);

        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        log::debug!("{}: running {} {}", repo.name(), self.program, args.join(" "));

        let output = cmd
            .output()
            .await
            .map_err(|e| FleetError::command_spawn(&self.program, e))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
