//! Version-control operations used by a release
//!
//! [Git] wraps a [CommandRunner] and speaks to the system `git` binary.
//! Queries (`has_uncommitted_changes`, `tag_exists`) interpret exit codes and
//! output as answers; mutations (`commit_all`, `push`, ...) fail with
//! [crate::error::ReleaseError::CommandFailed] on a nonzero exit.

use crate::error::Result;
use crate::process::{args, CommandRunner};

const GIT: &str = "git";

/// Git collaborator backed by a command runner
pub struct Git<'a, R: CommandRunner> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> Git<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Git { runner }
    }

    /// Whether the working tree differs from HEAD.
    ///
    /// `git diff-index --quiet HEAD` exits 0 for a clean tree and nonzero otherwise.
    pub fn has_uncommitted_changes(&self) -> Result<bool> {
        let outcome = self
            .runner
            .run(GIT, &args(["diff-index", "--quiet", "HEAD"]))?;
        Ok(!outcome.is_success())
    }

    /// Whether a tag named exactly `tag` exists locally.
    ///
    /// # Returns
    /// * `Ok(true)` - If `git tag -l <tag>` lists anything
    /// * `Ok(false)` - If the listing is empty
    /// * `Err` - If git could not list tags
    pub fn tag_exists(&self, tag: &str) -> Result<bool> {
        let stdout = self.run_checked(args(["tag", "-l", tag]))?;
        Ok(!stdout.trim().is_empty())
    }

    /// Stage all tracked modifications and commit them with `message`
    pub fn commit_all(&self, message: &str) -> Result<()> {
        self.run_checked(args(["commit", "-am", message]))?;
        Ok(())
    }

    /// Push `branch` to `remote`
    pub fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run_checked(args(["push", remote, branch]))?;
        Ok(())
    }

    /// Create a lightweight tag at HEAD
    pub fn create_tag(&self, tag: &str) -> Result<()> {
        self.run_checked(args(["tag", tag]))?;
        Ok(())
    }

    /// Push all local tags to `remote`
    pub fn push_tags(&self, remote: &str) -> Result<()> {
        self.run_checked(args(["push", "--tags", remote]))?;
        Ok(())
    }

    /// Commit everything with `message`, then push `branch` to `remote`
    pub fn commit_and_push(&self, message: &str, remote: &str, branch: &str) -> Result<()> {
        self.commit_all(message)?;
        self.push(remote, branch)
    }

    fn run_checked(&self, git_args: Vec<String>) -> Result<String> {
        self.runner.run_checked(GIT, &git_args)
    }
}
