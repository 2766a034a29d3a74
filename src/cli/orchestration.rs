//! Main workflow orchestration logic
//!
//! This module contains the release workflow that `main.rs` drives. It
//! provides a clean separation between CLI argument parsing and business
//! logic, and is the only place where outcomes are mapped to exit codes.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::ReleaseConfig;
use crate::domain::{parse_version, ReleasePlan};
use crate::error::{ReleaseError, Result};
use crate::git::Git;
use crate::process::CommandRunner;
use crate::steps::{self, ExecutionMode, StepContext};
use crate::ui;
use crate::validator;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Version to release, as typed by the user
    pub release_version: String,

    /// Version development continues on, as typed by the user
    pub next_version: String,

    /// Simulate the steps without running any command
    pub dry_run: bool,
}

/// How a release run ended when it did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// Every step ran (or was simulated)
    Released(ReleasePlan),
    /// The operator declined the confirmation prompt
    Aborted,
}

/// Main release workflow
///
/// Orchestrates the entire release:
/// 1. Parse both versions
/// 2. Build the release plan
/// 3. Validate repository preconditions
/// 4. Ask the operator for confirmation
/// 5. Execute the release steps
///
/// Nothing touches the repository before step 5, and nothing is printed to
/// stderr here; failures come back as [ReleaseError] for the caller to report.
///
/// # Arguments
///
/// * `args` - Versions and dry-run flag
/// * `config` - Release configuration
/// * `runner` - Runs git and the build tool
/// * `workdir` - Directory documentation globs are resolved against
/// * `input` - Source of the confirmation answer
/// * `output` - Receives the plan, prompt and progress
pub fn run_release<R, I, O>(
    args: &ReleaseArgs,
    config: &ReleaseConfig,
    runner: &R,
    workdir: &Path,
    input: &mut I,
    output: &mut O,
) -> Result<ReleaseOutcome>
where
    R: CommandRunner,
    I: BufRead,
    O: Write,
{
    let release_version = parse_version(&args.release_version)?;
    let next_version = parse_version(&args.next_version)?;
    let plan = ReleasePlan::new(release_version, next_version)?;
    log::info!("Preparing release {}", plan);

    let git = Git::new(runner);
    let plan = validator::validate(plan, &git).map_err(ReleaseError::Validation)?;

    let release_steps = steps::release_steps(&plan);
    if !ui::confirm_release(&plan, &release_steps, input, output)? {
        log::info!("Release of {} declined", plan.tag());
        ui::display_aborted(output)?;
        return Ok(ReleaseOutcome::Aborted);
    }

    let mode = ExecutionMode::from_flag(args.dry_run, config);
    let ctx = StepContext {
        runner,
        config,
        workdir,
    };

    writeln!(output)?;
    steps::execute_all(&release_steps, &mode, &ctx, output)?;

    ui::display_summary(output, &plan, args.dry_run, config.summary_url.as_deref())?;
    Ok(ReleaseOutcome::Released(plan))
}

/// Map a workflow result to the process exit code
///
/// Success and a declined confirmation exit with 0; every error exits with 1.
pub fn exit_code(result: &Result<ReleaseOutcome>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
