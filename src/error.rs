use thiserror::Error;

use crate::validator::ValidationFailure;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("'{input}' is not a valid semantic version: {source}")]
    InvalidVersion {
        input: String,
        #[source]
        source: semver::Error,
    },

    #[error("Next version {next} must be greater than release version {release}")]
    VersionNotIncreasing {
        release: semver::Version,
        next: semver::Version,
    },

    #[error("Release blocked by {} failed precondition(s)", .0.len())]
    Validation(Vec<ValidationFailure>),

    #[error("Command `{command}` failed with exit code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        completed: Vec<String>,
        #[source]
        source: Box<ReleaseError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Wrap the failure of a single step, remembering which steps already ran
    pub fn step_failed(step: impl Into<String>, completed: Vec<String>, source: ReleaseError) -> Self {
        ReleaseError::StepFailed {
            step: step.into(),
            completed,
            source: Box::new(source),
        }
    }

    /// True for errors raised before any repository state was touched.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ReleaseError::InvalidVersion { .. } | ReleaseError::VersionNotIncreasing { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_validation_error_counts_failures() {
        let err = ReleaseError::Validation(vec![
            ValidationFailure::UncommittedChanges,
            ValidationFailure::TagExists {
                tag: "v1.0.0".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "Release blocked by 2 failed precondition(s)");
    }

    #[test]
    fn test_step_failed_names_step_and_cause() {
        let err = ReleaseError::step_failed(
            "Push tag v2.0.0",
            vec!["Update to version 2.0.0".to_string()],
            ReleaseError::CommandFailed {
                command: "git push --tags origin".to_string(),
                code: 128,
                stderr: "rejected".to_string(),
            },
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Step 'Push tag v2.0.0' failed"));
        assert!(msg.contains("exit code 128"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_version_not_increasing_is_input_error() {
        let err = ReleaseError::VersionNotIncreasing {
            release: semver::Version::new(2, 0, 0),
            next: semver::Version::new(1, 9, 0),
        };
        assert!(err.is_input_error());
        assert_eq!(
            err.to_string(),
            "Next version 1.9.0 must be greater than release version 2.0.0"
        );
    }
}
