use crate::config::BuildConfig;
use crate::error::Result;
use crate::process::CommandRunner;

const VERSION_PLACEHOLDER: &str = "{version}";

/// Build tool collaborator: sets the project version and regenerates sources.
///
/// Which program runs and with which arguments comes from [BuildConfig].
pub struct BuildTool<'a, R: CommandRunner> {
    runner: &'a R,
    config: &'a BuildConfig,
}

impl<'a, R: CommandRunner> BuildTool<'a, R> {
    pub fn new(runner: &'a R, config: &'a BuildConfig) -> Self {
        BuildTool { runner, config }
    }

    /// Set the project version to `version`
    pub fn set_version(&self, version: &str) -> Result<()> {
        self.invoke("set-version", &self.config.set_version, Some(version))
    }

    /// Regenerate derived sources and documentation
    pub fn generate_sources(&self) -> Result<()> {
        self.invoke("generate-sources", &self.config.generate_sources, None)
    }

    /// Move the unreleased changelog entries under the release heading
    pub fn release_changelog(&self, version: &str) -> Result<()> {
        self.invoke("changelog", &self.config.changelog, Some(version))
    }

    fn invoke(&self, action: &str, template: &[String], version: Option<&str>) -> Result<()> {
        if template.is_empty() {
            log::debug!(
                "No {} arguments configured for {}, skipping",
                self.config.program,
                action
            );
            return Ok(());
        }
        let args = expand(template, version);
        self.runner.run_checked(&self.config.program, &args)?;
        Ok(())
    }
}

fn expand(template: &[String], version: Option<&str>) -> Vec<String> {
    template
        .iter()
        .map(|arg| match version {
            Some(version) => arg.replace(VERSION_PLACEHOLDER, version),
            None => arg.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{ExecutionOutcome, ScriptedRunner};

    #[test]
    fn test_set_version_expands_placeholder() {
        let runner = ScriptedRunner::new();
        let config = BuildConfig::default();
        BuildTool::new(&runner, &config)
            .set_version("2.1.0-SNAPSHOT")
            .unwrap();
        assert_eq!(
            runner.calls(),
            vec!["mvn -DnewVersion=2.1.0-SNAPSHOT versions:set"]
        );
    }

    #[test]
    fn test_empty_template_is_skipped() {
        let runner = ScriptedRunner::new();
        let config = BuildConfig {
            generate_sources: Vec::new(),
            ..BuildConfig::default()
        };
        BuildTool::new(&runner, &config).generate_sources().unwrap();
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_custom_program() {
        let runner = ScriptedRunner::new();
        let config = BuildConfig {
            program: "./gradlew".to_string(),
            changelog: vec!["patchChangelog".to_string(), "-Pversion={version}".to_string()],
            ..BuildConfig::default()
        };
        BuildTool::new(&runner, &config)
            .release_changelog("3.0.0")
            .unwrap();
        assert_eq!(runner.calls(), vec!["./gradlew patchChangelog -Pversion=3.0.0"]);
    }

    #[test]
    fn test_failure_propagates() {
        let runner = ScriptedRunner::new()
            .respond("mvn", ExecutionOutcome::failure(1, "BUILD FAILURE"));
        let config = BuildConfig::default();
        let err = BuildTool::new(&runner, &config)
            .generate_sources()
            .unwrap_err();
        assert!(err.to_string().contains("BUILD FAILURE"));
    }
}
