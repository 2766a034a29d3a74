//! The ordered release steps and their executor.
//!
//! [release_steps] builds the fixed sequence for a plan. The same values are
//! shown by the confirmation prompt and run by [execute_all], so what the
//! operator approves is what runs.

use crate::build_tool::BuildTool;
use crate::config::ReleaseConfig;
use crate::docs;
use crate::domain::ReleasePlan;
use crate::error::{ReleaseError, Result};
use crate::git::Git;
use crate::process::CommandRunner;
use crate::ui::formatter;
use rand::Rng;
use std::io::Write;
use std::ops::RangeInclusive;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// One unit of side effect inside a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Set the build's project version
    SetVersion(String),
    /// Regenerate derived sources
    GenerateSources,
    /// Rewrite `<version>` references in the documentation
    UpdateDocs(String),
    /// Release the changelog's unreleased section
    ReleaseChangelog(String),
    /// Commit all changes, then push the configured branch
    CommitAndPush { message: String },
    /// Create the release tag
    CreateTag(String),
    /// Push tags to the configured remote
    PushTags,
}

/// How steps are carried out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run the real commands
    Live,
    /// Touch nothing; wait for a random duration in `delay` instead
    DryRun { delay: RangeInclusive<Duration> },
}

impl ExecutionMode {
    pub fn from_flag(dry_run: bool, config: &ReleaseConfig) -> Self {
        if dry_run {
            ExecutionMode::DryRun {
                delay: config.dry_run.delay_range(),
            }
        } else {
            ExecutionMode::Live
        }
    }
}

/// What a live step needs to reach the outside world
pub struct StepContext<'a, R: CommandRunner> {
    pub runner: &'a R,
    pub config: &'a ReleaseConfig,
    /// Directory the documentation globs are resolved against
    pub workdir: &'a Path,
}

/// A named, ordered unit of the release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseStep {
    label: String,
    actions: Vec<StepAction>,
}

impl ReleaseStep {
    pub fn new(label: impl Into<String>, actions: Vec<StepAction>) -> Self {
        ReleaseStep {
            label: label.into(),
            actions,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn actions(&self) -> &[StepAction] {
        &self.actions
    }

    /// Run this step in the given mode
    pub fn execute<R: CommandRunner>(&self, mode: &ExecutionMode, ctx: &StepContext<'_, R>) -> Result<()> {
        match mode {
            ExecutionMode::DryRun { delay } => {
                thread::sleep(simulated_delay(delay));
                Ok(())
            }
            ExecutionMode::Live => {
                for action in &self.actions {
                    perform(action, ctx)?;
                }
                Ok(())
            }
        }
    }
}

/// The release sequence for `plan`, in execution order
pub fn release_steps(plan: &ReleasePlan) -> Vec<ReleaseStep> {
    let release = plan.release_version().to_string();
    let snapshot = plan.snapshot_version().to_string();

    vec![
        ReleaseStep::new(
            format!("Update to version {}", release),
            vec![StepAction::SetVersion(release.clone())],
        ),
        ReleaseStep::new("Regenerate sources", vec![StepAction::GenerateSources]),
        ReleaseStep::new(
            "Update README & changelog",
            vec![
                StepAction::UpdateDocs(release.clone()),
                StepAction::ReleaseChangelog(release.clone()),
            ],
        ),
        ReleaseStep::new(
            "Push changes",
            vec![StepAction::CommitAndPush {
                message: format!("Release {}", release),
            }],
        ),
        ReleaseStep::new(
            format!("Push tag {}", plan.tag()),
            vec![
                StepAction::CreateTag(plan.tag().to_string()),
                StepAction::PushTags,
            ],
        ),
        ReleaseStep::new(
            format!("Update to version {}", snapshot),
            vec![StepAction::SetVersion(snapshot.clone())],
        ),
        ReleaseStep::new(
            "Push changes",
            vec![StepAction::CommitAndPush {
                message: format!("Next is {}", snapshot),
            }],
        ),
    ]
}

/// Run `steps` in order, stopping at the first failure.
///
/// Progress for each step is written to `progress` before the step starts
/// and rewritten with a success or failure glyph when it ends.
///
/// # Returns
/// * `Ok(())` - Every step succeeded
/// * `Err(ReleaseError::StepFailed)` - Naming the failed step and the steps already applied
pub fn execute_all<R: CommandRunner, W: Write>(
    steps: &[ReleaseStep],
    mode: &ExecutionMode,
    ctx: &StepContext<'_, R>,
    progress: &mut W,
) -> Result<()> {
    let mut completed: Vec<String> = Vec::with_capacity(steps.len());

    for step in steps {
        formatter::announce_step(progress, step.label())?;
        log::debug!("Starting step '{}'", step.label());

        match step.execute(mode, ctx) {
            Ok(()) => {
                formatter::finish_step(progress, step.label())?;
                completed.push(step.label().to_string());
            }
            Err(e) => {
                formatter::fail_step(progress, step.label())?;
                log::warn!("Step '{}' failed: {}", step.label(), e);
                return Err(ReleaseError::step_failed(step.label(), completed, e));
            }
        }
    }
    Ok(())
}

fn perform<R: CommandRunner>(action: &StepAction, ctx: &StepContext<'_, R>) -> Result<()> {
    let git = Git::new(ctx.runner);
    let build = BuildTool::new(ctx.runner, &ctx.config.build);

    match action {
        StepAction::SetVersion(version) => build.set_version(version),
        StepAction::GenerateSources => build.generate_sources(),
        StepAction::UpdateDocs(version) => {
            let updated = docs::update_version_references(ctx.workdir, &ctx.config.docs.files, version)?;
            log::info!("Updated version references in {} file(s)", updated);
            Ok(())
        }
        StepAction::ReleaseChangelog(version) => build.release_changelog(version),
        StepAction::CommitAndPush { message } => {
            git.commit_and_push(message, &ctx.config.remote, &ctx.config.branch)
        }
        StepAction::CreateTag(tag) => git.create_tag(tag),
        StepAction::PushTags => git.push_tags(&ctx.config.remote),
    }
}

fn simulated_delay(range: &RangeInclusive<Duration>) -> Duration {
    if range.start() >= range.end() {
        return *range.start();
    }
    rand::rng().random_range(range.clone())
}
