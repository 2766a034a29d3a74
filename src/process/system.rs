use crate::error::Result;
use crate::process::{command_line, CommandRunner, ExecutionOutcome};
use std::process::Command;

/// Runs commands as child processes of the current working directory
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ExecutionOutcome> {
        let line = command_line(program, args);
        log::debug!("Running `{}`", line);

        let output = Command::new(program).args(args).output().map_err(|e| {
            std::io::Error::new(e.kind(), format!("Failed to execute `{}`: {}", line, e))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            log::debug!("`{}` succeeded", line);
            Ok(ExecutionOutcome::Success { stdout, stderr })
        } else {
            let code = output.status.code().unwrap_or(-1);
            log::debug!("`{}` exited with code {}", line, code);
            Ok(ExecutionOutcome::Failure { code, stderr })
        }
    }
}
