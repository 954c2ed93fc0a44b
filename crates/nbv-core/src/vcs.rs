//! Version-control collaborator
//!
//! The procedures only need three operations from git; [`GitCli`] shells out
//! to the `git` binary for each of them.

use std::path::{Path, PathBuf};
use std::process::Command;

use nbv_menu::Tag;

use crate::error::VcsError;

/// Operations the procedures need from version control
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// All tags, in the order the backend lists them
    ///
    /// # Errors
    /// Returns [`VcsError`] if the backend fails.
    fn list_tags(&self) -> Result<Vec<Tag>, VcsError>;

    /// Check out a revision, blocking until done
    ///
    /// # Errors
    /// Returns [`VcsError`] if the checkout fails.
    fn checkout(&self, reference: &str) -> Result<(), VcsError>;

    /// The currently checked-out revision
    ///
    /// # Errors
    /// Returns [`VcsError`] if the backend fails.
    fn current_ref(&self) -> Result<String, VcsError>;
}

/// `git` command-line backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    /// Backend for the working tree at `repo`
    #[inline]
    #[must_use]
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    /// Working tree path
    #[inline]
    #[must_use]
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    fn run(&self, args: &[&str]) -> Result<String, VcsError> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!("Running `{command}` in {}", self.repo.display());

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .output()
            .map_err(|source| VcsError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(VcsError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| VcsError::InvalidOutput {
            command,
            message: e.to_string(),
        })
    }
}

impl VersionControl for GitCli {
    fn list_tags(&self) -> Result<Vec<Tag>, VcsError> {
        let stdout = self.run(&["tag"])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Tag::from)
            .collect())
    }

    fn checkout(&self, reference: &str) -> Result<(), VcsError> {
        self.run(&["checkout", "--quiet", reference]).map(|_| ())
    }

    fn current_ref(&self) -> Result<String, VcsError> {
        let branch = self.run(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let branch = branch.trim();
        if branch != "HEAD" {
            return Ok(branch.to_string());
        }

        // Detached HEAD: fall back to the commit id so it can be restored.
        let commit = self.run(&["rev-parse", "HEAD"])?;
        let commit = commit.trim();
        if commit.is_empty() {
            return Err(VcsError::InvalidOutput {
                command: "git rev-parse HEAD".to_string(),
                message: "empty commit id".to_string(),
            });
        }
        Ok(commit.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_repository_is_a_command_failure() {
        if Command::new("git").arg("--version").output().is_err() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new(dir.path().join("not-a-repo"));
        assert!(matches!(
            git.list_tags(),
            Err(VcsError::CommandFailed { .. })
        ));
    }
}
