use crate::error::{ReleaseError, Result};
use crate::process::{command_line, CommandRunner, ExecutionOutcome};
use std::sync::Mutex;

/// Command runner for tests that never spawns a process.
///
/// Responses are matched by command-line prefix in the order they were
/// registered; unmatched commands succeed with empty output. Every call is
/// recorded and available through [ScriptedRunner::calls].
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Vec<(String, ScriptedResponse)>,
    calls: Mutex<Vec<String>>,
}

#[derive(Debug, Clone)]
enum ScriptedResponse {
    Outcome(ExecutionOutcome),
    SpawnError(String),
}

impl ScriptedRunner {
    /// Create a runner where every command succeeds with empty output
    pub fn new() -> Self {
        ScriptedRunner::default()
    }

    /// Answer commands starting with `prefix` with `outcome`
    pub fn respond(mut self, prefix: impl Into<String>, outcome: ExecutionOutcome) -> Self {
        self.responses
            .push((prefix.into(), ScriptedResponse::Outcome(outcome)));
        self
    }

    /// Make commands starting with `prefix` fail to start at all
    pub fn fail_to_spawn(mut self, prefix: impl Into<String>, reason: impl Into<String>) -> Self {
        self.responses
            .push((prefix.into(), ScriptedResponse::SpawnError(reason.into())));
        self
    }

    /// All command lines run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Number of recorded calls starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ExecutionOutcome> {
        let line = command_line(program, args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(line.clone());
        }

        let response = self
            .responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, response)| response.clone());

        match response {
            Some(ScriptedResponse::Outcome(outcome)) => Ok(outcome),
            Some(ScriptedResponse::SpawnError(reason)) => Err(ReleaseError::Io(
                std::io::Error::new(std::io::ErrorKind::NotFound, reason),
            )),
            None => Ok(ExecutionOutcome::success("")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::args;

    #[test]
    fn test_unmatched_command_succeeds() {
        let runner = ScriptedRunner::new();
        let outcome = runner.run("git", &args(["status"])).unwrap();
        assert!(outcome.is_success());
        assert_eq!(runner.calls(), vec!["git status".to_string()]);
    }

    #[test]
    fn test_first_matching_prefix_wins() {
        let runner = ScriptedRunner::new()
            .respond("git tag -l", ExecutionOutcome::success("v1.0.0\n"))
            .respond("git tag", ExecutionOutcome::failure(1, "nope"));

        let listed = runner.run("git", &args(["tag", "-l", "v1.0.0"])).unwrap();
        assert_eq!(listed, ExecutionOutcome::success("v1.0.0\n"));

        let created = runner.run("git", &args(["tag", "v1.0.0"])).unwrap();
        assert!(!created.is_success());
        assert_eq!(runner.count("git tag"), 2);
    }

    #[test]
    fn test_spawn_error() {
        let runner = ScriptedRunner::new().fail_to_spawn("mvn", "mvn not installed");
        assert!(runner.run("mvn", &args(["versions:set"])).is_err());
        assert_eq!(runner.count("mvn"), 1);
    }
}
