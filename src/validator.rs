//! Release preconditions.
//!
//! Every check runs, even after an earlier one failed, so a single run
//! reports everything that blocks the release.

use crate::domain::ReleasePlan;
use crate::git::Git;
use crate::process::CommandRunner;
use std::fmt;

/// A precondition that blocks the release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// The working tree differs from HEAD
    UncommittedChanges,
    /// The release tag is already present
    TagExists { tag: String },
    /// A check could not be carried out
    CheckFailed { check: &'static str, reason: String },
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::UncommittedChanges => write!(f, "You have uncommitted changes."),
            ValidationFailure::TagExists { tag } => {
                write!(f, "The tag '{}' already exists.", tag)
            }
            ValidationFailure::CheckFailed { check, reason } => {
                write!(f, "Could not check {}: {}", check, reason)
            }
        }
    }
}

impl std::error::Error for ValidationFailure {}

/// Check that `plan` can be released from the current repository state.
///
/// # Returns
/// * `Ok(ReleasePlan)` - The unchanged plan when every check passes
/// * `Err(Vec<ValidationFailure>)` - All failed checks, never empty
pub fn validate<R: CommandRunner>(
    plan: ReleasePlan,
    git: &Git<'_, R>,
) -> Result<ReleasePlan, Vec<ValidationFailure>> {
    let checks = [check_working_tree(git), check_tag(git, plan.tag())];
    let failures: Vec<ValidationFailure> = checks.into_iter().flatten().collect();

    if failures.is_empty() {
        log::info!("All release preconditions passed for {}", plan.tag());
        Ok(plan)
    } else {
        log::info!("{} release precondition(s) failed", failures.len());
        Err(failures)
    }
}

fn check_working_tree<R: CommandRunner>(git: &Git<'_, R>) -> Option<ValidationFailure> {
    match git.has_uncommitted_changes() {
        Ok(false) => None,
        Ok(true) => Some(ValidationFailure::UncommittedChanges),
        Err(e) => Some(ValidationFailure::CheckFailed {
            check: "working tree",
            reason: e.to_string(),
        }),
    }
}

fn check_tag<R: CommandRunner>(git: &Git<'_, R>, tag: &str) -> Option<ValidationFailure> {
    match git.tag_exists(tag) {
        Ok(false) => None,
        Ok(true) => Some(ValidationFailure::TagExists {
            tag: tag.to_string(),
        }),
        Err(e) => Some(ValidationFailure::CheckFailed {
            check: "existing tags",
            reason: e.to_string(),
        }),
    }
}
