//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{BufRead, Write};

use crate::domain::ReleasePlan;
use crate::error::Result;
use crate::steps::ReleaseStep;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_aborted, display_error, display_release_error, display_status, display_summary,
    display_validation_failures, render_plan,
};

/// Shows the release plan and asks the operator to go ahead.
///
/// Only "y" or "yes" (case-insensitive) confirms. Anything else, an empty
/// line, or end of input declines.
///
/// # Arguments
/// * `plan` - The validated release plan
/// * `steps` - The steps that will run if confirmed
/// * `input` - Where the answer is read from
/// * `output` - Where the plan and prompt are written
///
/// # Returns
/// * `Ok(true)` - If the operator confirmed
/// * `Ok(false)` - Otherwise
/// * `Err` - If reading or writing the terminal fails
pub fn confirm_release<I: BufRead, O: Write>(
    plan: &ReleasePlan,
    steps: &[ReleaseStep],
    input: &mut I,
    output: &mut O,
) -> Result<bool> {
    write!(output, "{}", render_plan(plan, steps))?;
    write!(output, "\nDo you wish to continue (y/N): ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }

    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    let response = answer.trim().to_lowercase();
    response == "y" || response == "yes"
}
