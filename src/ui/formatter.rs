//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Progress output takes an explicit writer so it can be captured in tests.

use std::io::{self, Write};

use console::style;

use crate::domain::ReleasePlan;
use crate::error::ReleaseError;
use crate::steps::ReleaseStep;
use crate::validator::ValidationFailure;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    // Nothing sensible is left to do if stderr itself is gone
    let _ = write_error(&mut io::stderr(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print one line per validation failure to stderr.
pub fn display_validation_failures(failures: &[ValidationFailure]) {
    let _ = write_validation_failures(&mut io::stderr(), failures);
}

/// Report a failed release on stderr.
pub fn display_release_error(error: &ReleaseError) {
    let _ = write_release_error(&mut io::stderr(), error);
}

/// Write a single error line.
pub fn write_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("Error:").red().bold(), message)
}

/// Write one error line per validation failure.
pub fn write_validation_failures<W: Write>(
    out: &mut W,
    failures: &[ValidationFailure],
) -> io::Result<()> {
    for failure in failures {
        write_error(out, &failure.to_string())?;
    }
    Ok(())
}

/// Write the report for a failed release.
///
/// Step failures additionally list the steps that were already applied,
/// since nothing is rolled back.
pub fn write_release_error<W: Write>(out: &mut W, error: &ReleaseError) -> io::Result<()> {
    match error {
        ReleaseError::Validation(failures) => write_validation_failures(out, failures),
        ReleaseError::StepFailed {
            step,
            completed,
            source,
        } => {
            write_error(out, &format!("Step '{}' failed: {}", step, source))?;
            if completed.is_empty() {
                writeln!(out, "  No changes were applied.")
            } else {
                writeln!(out, "  These steps were applied and were not rolled back:")?;
                for label in completed {
                    writeln!(out, "    {} {}", style("✓").green(), label)?;
                }
                writeln!(out, "  Finish or revert the release manually.")
            }
        }
        other if other.is_input_error() => {
            write_error(out, &other.to_string())?;
            writeln!(out, "  No changes were applied.")
        }
        other => write_error(out, &other.to_string()),
    }
}

/// Build the text shown before asking for confirmation.
///
/// The numbered list is generated from `steps`, the same values the executor runs.
pub fn render_plan(plan: &ReleasePlan, steps: &[ReleaseStep]) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "Codebase is ready to release {} (next: {}).\n\n",
        style(plan.tag()).cyan(),
        style(plan.snapshot_version()).cyan()
    ));
    text.push_str("If you decide to continue, these steps will run:\n\n");
    for (i, step) in steps.iter().enumerate() {
        text.push_str(&format!("   {}. {}\n", i + 1, step.label()));
    }
    text
}

/// Print the label of a step that is about to run, without a newline.
pub fn announce_step<W: Write>(out: &mut W, label: &str) -> io::Result<()> {
    write!(out, "{} {}", style("…").yellow(), label)?;
    out.flush()
}

/// Rewrite the current progress line as completed.
pub fn finish_step<W: Write>(out: &mut W, label: &str) -> io::Result<()> {
    writeln!(out, "\r{} {}", style("✓").green(), label)?;
    out.flush()
}

/// Rewrite the current progress line as failed.
pub fn fail_step<W: Write>(out: &mut W, label: &str) -> io::Result<()> {
    writeln!(out, "\r{} {}", style("✗").red(), label)?;
    out.flush()
}

/// Print the closing summary of a successful release.
pub fn display_summary<W: Write>(
    out: &mut W,
    plan: &ReleasePlan,
    dry_run: bool,
    summary_url: Option<&str>,
) -> io::Result<()> {
    writeln!(out)?;
    if dry_run {
        writeln!(
            out,
            "{}. Nothing was changed; {} was not released.",
            style("Dry run complete").green(),
            plan.tag()
        )?;
    } else {
        writeln!(
            out,
            "{}. Released {}, development continues on {}.",
            style("All done").green(),
            style(plan.tag()).cyan(),
            style(plan.snapshot_version()).cyan()
        )?;
        if let Some(url) = summary_url {
            writeln!(out, "Watch the release at {}", url)?;
        }
    }
    Ok(())
}

/// Tell the operator the release was declined.
pub fn display_aborted<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", style("Aborted").yellow())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::release_steps;
    use semver::Version;

    fn plan() -> ReleasePlan {
        ReleasePlan::new(Version::new(2, 0, 0), Version::new(2, 1, 0)).unwrap()
    }

    #[test]
    fn test_render_plan_numbers_every_step() {
        let plan = plan();
        let steps = release_steps(&plan);
        let text = console::strip_ansi_codes(&render_plan(&plan, &steps)).to_string();

        assert!(text.contains("v2.0.0"));
        for (i, step) in steps.iter().enumerate() {
            assert!(text.contains(&format!("{}. {}", i + 1, step.label())));
        }
        assert!(!text.contains("8. "));
    }

    #[test]
    fn test_progress_lines() {
        let mut out = Vec::new();
        announce_step(&mut out, "Push changes").unwrap();
        finish_step(&mut out, "Push changes").unwrap();
        let text = console::strip_ansi_codes(&String::from_utf8(out).unwrap()).to_string();
        assert_eq!(text, "… Push changes\r✓ Push changes\n");
    }

    #[test]
    fn test_summary_mentions_url_only_for_real_release() {
        let mut real = Vec::new();
        display_summary(&mut real, &plan(), false, Some("https://ci.example/run")).unwrap();
        assert!(String::from_utf8(real).unwrap().contains("https://ci.example/run"));

        let mut dry = Vec::new();
        display_summary(&mut dry, &plan(), true, Some("https://ci.example/run")).unwrap();
        let dry = String::from_utf8(dry).unwrap();
        assert!(dry.contains("Dry run complete"));
        assert!(!dry.contains("https://ci.example/run"));
    }

    fn plain(bytes: Vec<u8>) -> String {
        console::strip_ansi_codes(&String::from_utf8(bytes).unwrap()).to_string()
    }

    #[test]
    fn test_one_error_line_per_validation_failure() {
        let failures = vec![
            ValidationFailure::UncommittedChanges,
            ValidationFailure::TagExists {
                tag: "v2.0.0".to_string(),
            },
        ];
        let mut out = Vec::new();
        write_release_error(&mut out, &ReleaseError::Validation(failures)).unwrap();

        assert_eq!(
            plain(out),
            "Error: You have uncommitted changes.\nError: The tag 'v2.0.0' already exists.\n"
        );
    }

    #[test]
    fn test_step_failure_lists_applied_steps() {
        let error = ReleaseError::step_failed(
            "Push tag v2.0.0",
            vec![
                "Update to version 2.0.0".to_string(),
                "Push changes".to_string(),
            ],
            ReleaseError::CommandFailed {
                command: "git tag v2.0.0".to_string(),
                code: 128,
                stderr: "already exists".to_string(),
            },
        );
        let mut out = Vec::new();
        write_release_error(&mut out, &error).unwrap();
        let text = plain(out);

        assert!(text.starts_with("Error: Step 'Push tag v2.0.0' failed"));
        assert!(text.contains("were not rolled back"));
        assert!(text.contains("✓ Update to version 2.0.0\n"));
        assert!(text.contains("✓ Push changes\n"));
    }

    #[test]
    fn test_input_error_reports_nothing_applied() {
        let error = ReleaseError::VersionNotIncreasing {
            release: semver::Version::new(2, 0, 0),
            next: semver::Version::new(1, 9, 0),
        };
        let mut out = Vec::new();
        write_release_error(&mut out, &error).unwrap();
        assert_eq!(
            plain(out),
            "Error: Next version 1.9.0 must be greater than release version 2.0.0\n  No changes were applied.\n"
        );
    }

    #[test]
    fn test_config_error_is_single_line() {
        let mut out = Vec::new();
        write_release_error(&mut out, &ReleaseError::config("bad remote")).unwrap();
        assert_eq!(plain(out), "Error: Configuration error: bad remote\n");
    }
}
