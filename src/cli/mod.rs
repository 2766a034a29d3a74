//! Command-line workflow
//!
//! `orchestration` holds the release workflow behind the binary so it can be
//! driven programmatically and in tests without clap.

pub mod orchestration;

pub use orchestration::{exit_code, run_release, ReleaseArgs, ReleaseOutcome};
