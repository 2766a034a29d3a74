//! External command execution
//!
//! Every side effect on an external tool (git, the build tool) goes through
//! the [CommandRunner] trait. Implementations:
//!
//! - [system::SystemRunner]: spawns real child processes
//! - [mock::ScriptedRunner]: answers from a table and records every call, for tests
//!
//! A nonzero exit status is not an error at this layer. It comes back as
//! [ExecutionOutcome::Failure] so callers can read it as an answer
//! ("there are uncommitted changes") or turn it into an error with
//! [ExecutionOutcome::into_stdout].

pub mod mock;
pub mod system;

pub use mock::ScriptedRunner;
pub use system::SystemRunner;

use crate::error::{ReleaseError, Result};

/// Captured result of one command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Exit code 0
    Success { stdout: String, stderr: String },
    /// Any other exit code; `-1` when the process was killed by a signal
    Failure { code: i32, stderr: String },
}

impl ExecutionOutcome {
    /// Successful outcome with the given stdout and empty stderr
    pub fn success(stdout: impl Into<String>) -> Self {
        ExecutionOutcome::Success {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed outcome with the given exit code and stderr
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        ExecutionOutcome::Failure {
            code,
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success { .. })
    }

    /// Convert into the captured stdout, or a [ReleaseError::CommandFailed]
    /// naming `command_line` when the command exited nonzero.
    pub fn into_stdout(self, command_line: &str) -> Result<String> {
        match self {
            ExecutionOutcome::Success { stdout, .. } => Ok(stdout),
            ExecutionOutcome::Failure { code, stderr } => Err(ReleaseError::CommandFailed {
                command: command_line.to_string(),
                code,
                stderr: stderr.trim().to_string(),
            }),
        }
    }
}

/// Runs external commands.
///
/// ## Contract
///
/// - stdout and stderr are captured separately
/// - a nonzero exit is returned as [ExecutionOutcome::Failure], never as `Err`
/// - `Err` means the process could not be started at all
/// - one call is one attempt; there are no retries
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[String]) -> Result<ExecutionOutcome>;

    /// Run a command and require it to succeed, returning its stdout
    fn run_checked(&self, program: &str, args: &[String]) -> Result<String> {
        self.run(program, args)?
            .into_stdout(&command_line(program, args))
    }
}

/// Render a command and its arguments as a single display string
pub fn command_line(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Build an owned argument vector from string slices
pub fn args<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}
