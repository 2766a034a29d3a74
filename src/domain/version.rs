use crate::error::{ReleaseError, Result};
use semver::Version;

/// Parse a user supplied version string into a semantic version.
///
/// Accepts the same loose input people type on the command line:
/// a leading `v`/`V` is ignored and missing minor or patch components
/// default to zero (`"1.2"` -> `1.2.0`). Pre-release and build metadata
/// are kept as-is.
///
/// # Returns
/// * `Ok(Version)` - The parsed version
/// * `Err(ReleaseError::InvalidVersion)` - If the text is not a semantic version
pub fn parse_version(input: &str) -> Result<Version> {
    let normalized = normalize(input);
    Version::parse(&normalized).map_err(|source| ReleaseError::InvalidVersion {
        input: input.to_string(),
        source,
    })
}

fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    let clean = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    // Split "1.2-rc.1+build" into the numeric core and the rest
    let split_at = clean.find(['-', '+']).unwrap_or(clean.len());
    let (core, rest) = clean.split_at(split_at);

    let components = core.split('.').count();
    if core.is_empty() || components >= 3 {
        return clean.to_string();
    }

    let mut padded = core.to_string();
    for _ in components..3 {
        padded.push_str(".0");
    }
    padded.push_str(rest);
    padded
}
