use crate::error::{ReleaseError, Result};
use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// Prefix put in front of the release version to form the tag name
pub const TAG_PREFIX: &str = "v";

/// Suffix appended to the next version while it is under development
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// The two versions a release moves between, plus the names derived from them.
///
/// A plan can only be obtained through [`ReleasePlan::new`], so every value of
/// this type satisfies `next_version > release_version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    release_version: Version,
    next_version: Version,
    tag: String,
    snapshot_version: String,
}

impl ReleasePlan {
    /// Create a plan, rejecting a next version that does not come after the release.
    ///
    /// Versions are compared by semver precedence, so build metadata is ignored.
    pub fn new(release_version: Version, next_version: Version) -> Result<Self> {
        if next_version.cmp_precedence(&release_version) != Ordering::Greater {
            return Err(ReleaseError::VersionNotIncreasing {
                release: release_version,
                next: next_version,
            });
        }

        let tag = format!("{}{}", TAG_PREFIX, release_version);
        let snapshot_version = format!("{}{}", next_version, SNAPSHOT_SUFFIX);

        Ok(ReleasePlan {
            release_version,
            next_version,
            tag,
            snapshot_version,
        })
    }

    pub fn release_version(&self) -> &Version {
        &self.release_version
    }

    pub fn next_version(&self) -> &Version {
        &self.next_version
    }

    /// Tag name for the release, e.g. `v2.0.0`
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Development version set after the release, e.g. `2.1.0-SNAPSHOT`
    pub fn snapshot_version(&self) -> &str {
        &self.snapshot_version
    }
}

impl fmt::Display for ReleasePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.release_version, self.snapshot_version
        )
    }
}
