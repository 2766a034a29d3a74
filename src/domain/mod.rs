//! Domain logic - the release plan and the versions it is built from

pub mod release;
pub mod version;

pub use release::ReleasePlan;
pub use version::parse_version;
