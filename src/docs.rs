//! In-place rewriting of version references in documentation.
//!
//! Installation snippets in docs usually carry a Maven style
//! `<version>1.2.3</version>` element. Before a release every such element in
//! the configured files is rewritten to the release version.

use crate::error::{ReleaseError, Result};
use regex::{NoExpand, Regex};
use std::fs;
use std::path::{Path, PathBuf};

const VERSION_ELEMENT: &str = r"<version>\d+\.\d+\.\d+[^<]*</version>";

/// Rewrite `<version>` elements in every file matched by `patterns`.
///
/// Patterns are glob expressions relative to `base`. Patterns that match
/// nothing are ignored. Files are only written when their content changes.
///
/// # Returns
/// * `Ok(usize)` - Number of files that were rewritten
/// * `Err` - If a pattern is malformed or a matched file cannot be read or written
pub fn update_version_references(base: &Path, patterns: &[String], version: &str) -> Result<usize> {
    let element = Regex::new(VERSION_ELEMENT)
        .map_err(|e| ReleaseError::config(format!("invalid version pattern: {}", e)))?;
    let replacement = format!("<version>{}</version>", version);

    let mut updated = 0;
    for path in matching_files(base, patterns)? {
        let content = fs::read_to_string(&path)?;
        let rewritten = element.replace_all(&content, NoExpand(&replacement));
        if rewritten != content {
            fs::write(&path, rewritten.as_bytes())?;
            log::debug!("Updated version references in {}", path.display());
            updated += 1;
        }
    }
    Ok(updated)
}

fn matching_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let full = format!(
            "{}/{}",
            glob::Pattern::escape(&base.to_string_lossy()),
            pattern
        );
        let entries = glob::glob(&full)
            .map_err(|e| ReleaseError::config(format!("invalid docs pattern '{}': {}", pattern, e)))?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() && !files.contains(&path) => files.push(path),
                Ok(_) => {}
                Err(e) => log::warn!("Skipping unreadable path: {}", e),
            }
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_rewrites_version_elements() {
        let dir = TempDir::new().unwrap();
        let readme = write(
            &dir,
            "README.md",
            "```xml\n<version>1.4.2</version>\n```\nand <version>1.5.0-SNAPSHOT</version>\n",
        );

        let count = update_version_references(
            dir.path(),
            &["README.md".to_string()],
            "2.0.0",
        )
        .unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            fs::read_to_string(readme).unwrap(),
            "```xml\n<version>2.0.0</version>\n```\nand <version>2.0.0</version>\n"
        );
    }

    #[test]
    fn test_glob_and_unchanged_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "docs/a.md", "<version>0.9.0</version>");
        write(&dir, "docs/b.md", "no versions here");
        write(&dir, "docs/c.txt", "<version>0.9.0</version>");

        let count = update_version_references(
            dir.path(),
            &["docs/*.md".to_string(), "missing/*.md".to_string()],
            "1.0.0",
        )
        .unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("docs/c.txt")).unwrap(),
            "<version>0.9.0</version>"
        );
    }

    #[test]
    fn test_overlapping_patterns_touch_file_once() {
        let dir = TempDir::new().unwrap();
        write(&dir, "docs/a.md", "<version>0.9.0</version>");

        let count = update_version_references(
            dir.path(),
            &["docs/*.md".to_string(), "docs/a.md".to_string()],
            "1.0.0",
        )
        .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        let result = update_version_references(dir.path(), &["docs/[".to_string()], "1.0.0");
        assert!(matches!(result, Err(ReleaseError::Config(_))));
    }
}
