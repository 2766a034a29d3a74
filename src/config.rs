use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// Represents the complete configuration for git-release.
///
/// Contains the push target, build tool commands, documentation files to
/// rewrite and the dry-run timing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    /// Printed after a successful release, e.g. a link to the CI workflow
    #[serde(default)]
    pub summary_url: Option<String>,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub docs: DocsConfig,

    #[serde(default)]
    pub dry_run: DryRunConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

/// Build tool invocations.
///
/// Each argument list may contain a `{version}` placeholder. An empty list
/// skips that invocation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_set_version")]
    pub set_version: Vec<String>,

    #[serde(default = "default_generate_sources")]
    pub generate_sources: Vec<String>,

    #[serde(default = "default_changelog")]
    pub changelog: Vec<String>,
}

fn default_program() -> String {
    "mvn".to_string()
}

fn default_set_version() -> Vec<String> {
    vec!["-DnewVersion={version}".to_string(), "versions:set".to_string()]
}

fn default_generate_sources() -> Vec<String> {
    vec!["generate-sources".to_string()]
}

fn default_changelog() -> Vec<String> {
    vec![
        "-DskipModules".to_string(),
        "keepachangelog:release".to_string(),
    ]
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            program: default_program(),
            set_version: default_set_version(),
            generate_sources: default_generate_sources(),
            changelog: default_changelog(),
        }
    }
}

/// Documentation files whose `<version>` references follow the release
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DocsConfig {
    /// Glob patterns relative to the working directory
    #[serde(default = "default_doc_files")]
    pub files: Vec<String>,
}

fn default_doc_files() -> Vec<String> {
    vec!["README.md".to_string(), "docs/*.md".to_string()]
}

impl Default for DocsConfig {
    fn default() -> Self {
        DocsConfig {
            files: default_doc_files(),
        }
    }
}

/// Simulated step duration used by `--dry-run`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DryRunConfig {
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_min_delay_ms() -> u64 {
    1111
}

fn default_max_delay_ms() -> u64 {
    4444
}

impl DryRunConfig {
    pub fn delay_range(&self) -> RangeInclusive<Duration> {
        Duration::from_millis(self.min_delay_ms)..=Duration::from_millis(self.max_delay_ms)
    }
}

impl Default for DryRunConfig {
    fn default() -> Self {
        DryRunConfig {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            remote: default_remote(),
            branch: default_branch(),
            summary_url: None,
            build: BuildConfig::default(),
            docs: DocsConfig::default(),
            dry_run: DryRunConfig::default(),
        }
    }
}

impl ReleaseConfig {
    /// Reject settings no release could run with
    pub fn validate(&self) -> Result<()> {
        if self.remote.trim().is_empty() {
            return Err(ReleaseError::config("remote must not be empty"));
        }
        if self.branch.trim().is_empty() {
            return Err(ReleaseError::config("branch must not be empty"));
        }
        if self.build.program.trim().is_empty() {
            return Err(ReleaseError::config("build.program must not be empty"));
        }
        if self.dry_run.min_delay_ms > self.dry_run.max_delay_ms {
            return Err(ReleaseError::config(format!(
                "dry_run.min_delay_ms ({}) is greater than dry_run.max_delay_ms ({})",
                self.dry_run.min_delay_ms, self.dry_run.max_delay_ms
            )));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in current directory
/// 3. `~/.config/.release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(ReleaseConfig)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<ReleaseConfig> {
    let config_str = if let Some(path) = config_path {
        read(Path::new(path))?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        read(Path::new(CONFIG_FILE_NAME))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            read(&config_path)?
        } else {
            return Ok(ReleaseConfig::default());
        }
    } else {
        return Ok(ReleaseConfig::default());
    };

    let config: ReleaseConfig = toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("invalid configuration: {}", e)))?;
    config.validate()?;
    Ok(config)
}

fn read(path: &Path) -> Result<String> {
    log::debug!("Loading configuration from {}", path.display());
    fs::read_to_string(path)
        .map_err(|e| ReleaseError::config(format!("cannot read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReleaseConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.remote, "origin");
        assert_eq!(config.branch, "main");
        assert_eq!(config.build.program, "mvn");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ReleaseConfig = toml::from_str(
            r#"
branch = "master"

[build]
program = "./mvnw"
"#,
        )
        .unwrap();
        assert_eq!(config.branch, "master");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.build.program, "./mvnw");
        assert_eq!(config.build.set_version, default_set_version());
        assert_eq!(config.dry_run, DryRunConfig::default());
    }

    #[test]
    fn test_inverted_delay_range_is_rejected() {
        let mut config = ReleaseConfig::default();
        config.dry_run.min_delay_ms = 10;
        config.dry_run.max_delay_ms = 5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dry_run.min_delay_ms"));
    }

    #[test]
    fn test_delay_range() {
        let range = DryRunConfig::default().delay_range();
        assert_eq!(*range.start(), Duration::from_millis(1111));
        assert_eq!(*range.end(), Duration::from_millis(4444));
    }
}
