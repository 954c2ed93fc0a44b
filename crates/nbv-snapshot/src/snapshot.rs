//! Snapshot operation
//!
//! One snapshot = copy the canonical notebook and recursively copy the
//! canonical cache directory under a version suffix. Existing destinations
//! are replaced.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use serde::Serialize;

use crate::error::SnapshotError;
use crate::fs::{Filesystem, LocalFilesystem};
use crate::layout::SnapshotLayout;

/// Whether a snapshot touches the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotMode {
    /// Perform the copies
    #[default]
    Apply,
    /// Only report what would be copied
    DryRun,
}

impl SnapshotMode {
    /// Mode for a `--dry-run` flag
    #[inline]
    #[must_use]
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun
        } else {
            Self::Apply
        }
    }

    /// True for [`SnapshotMode::DryRun`]
    #[inline]
    #[must_use]
    pub fn is_dry_run(self) -> bool {
        matches!(self, Self::DryRun)
    }
}

/// Kind of copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Single file copy
    CopyFile,
    /// Recursive directory copy
    CopyTree,
}

/// One planned or performed copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotAction {
    /// Kind of copy
    pub kind: ActionKind,
    /// Canonical source
    pub source: PathBuf,
    /// Versioned destination
    pub destination: PathBuf,
    /// Whether the destination already existed
    pub replaced: bool,
}

impl Display for SnapshotAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' to '{}'",
            self.source.display(),
            self.destination.display()
        )
    }
}

/// Outcome of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotReport {
    /// Version suffix used for the destination names
    pub suffix: String,
    /// Mode the snapshot ran in
    pub mode: SnapshotMode,
    /// Copies in execution order
    pub actions: Vec<SnapshotAction>,
}

/// Creates versioned copies of the canonical notebook and cache
#[derive(Debug, Clone)]
pub struct Snapshotter<F = LocalFilesystem> {
    fs: F,
    layout: SnapshotLayout,
}

impl Snapshotter<LocalFilesystem> {
    /// Snapshotter over the real filesystem
    #[inline]
    #[must_use]
    pub fn local(layout: SnapshotLayout) -> Self {
        Self::new(LocalFilesystem, layout)
    }
}

impl<F: Filesystem> Snapshotter<F> {
    /// Create with a filesystem and layout
    #[inline]
    #[must_use]
    pub fn new(fs: F, layout: SnapshotLayout) -> Self {
        Self { fs, layout }
    }

    /// Layout in use
    #[inline]
    #[must_use]
    pub fn layout(&self) -> &SnapshotLayout {
        &self.layout
    }

    /// Filesystem in use
    #[inline]
    #[must_use]
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Actions a snapshot under `suffix` consists of
    #[must_use]
    pub fn plan(&self, suffix: &str) -> Vec<SnapshotAction> {
        let notebook = self.layout.versioned_notebook_path(suffix);
        let cache = self.layout.versioned_cache_path(suffix);
        vec![
            SnapshotAction {
                kind: ActionKind::CopyFile,
                source: self.layout.notebook_path(),
                replaced: self.fs.exists(&notebook),
                destination: notebook,
            },
            SnapshotAction {
                kind: ActionKind::CopyTree,
                source: self.layout.cache_path(),
                replaced: self.fs.exists(&cache),
                destination: cache,
            },
        ]
    }

    /// Snapshot the canonical pair under `suffix`
    ///
    /// # Errors
    /// - [`SnapshotError::MissingSource`] if the notebook or cache is absent;
    ///   nothing has been copied in that case
    /// - [`SnapshotError::Io`] if a copy or removal fails
    pub fn snapshot(&self, suffix: &str, mode: SnapshotMode) -> Result<SnapshotReport, SnapshotError> {
        let actions = self.plan(suffix);

        if mode.is_dry_run() {
            for action in &actions {
                tracing::info!("Would copy {action}");
            }
        } else {
            for action in &actions {
                if !self.fs.exists(&action.source) {
                    return Err(SnapshotError::MissingSource(action.source.clone()));
                }
            }
            for action in &actions {
                self.apply(action)?;
            }
        }

        Ok(SnapshotReport {
            suffix: suffix.to_string(),
            mode,
            actions,
        })
    }

    fn apply(&self, action: &SnapshotAction) -> Result<(), SnapshotError> {
        let dst = &action.destination;
        match action.kind {
            ActionKind::CopyFile => {
                if self.fs.is_dir(dst) {
                    tracing::warn!("Removing directory in place of {}", dst.display());
                    self.fs
                        .remove_tree(dst)
                        .map_err(|e| SnapshotError::io_error("remove_tree", dst, e))?;
                }
                self.fs
                    .copy_file(&action.source, dst)
                    .map_err(|e| SnapshotError::io_error("copy_file", dst, e))?;
            }
            ActionKind::CopyTree => {
                if self.fs.exists(dst) {
                    tracing::warn!("Replacing existing {}", dst.display());
                    self.fs
                        .remove_tree(dst)
                        .map_err(|e| SnapshotError::io_error("remove_tree", dst, e))?;
                }
                self.fs
                    .copy_tree(&action.source, dst)
                    .map_err(|e| SnapshotError::io_error("copy_tree", dst, e))?;
            }
        }
        tracing::info!("Copied {action}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_flag() {
        assert_eq!(SnapshotMode::from_dry_run(true), SnapshotMode::DryRun);
        assert_eq!(SnapshotMode::from_dry_run(false), SnapshotMode::Apply);
        assert!(!SnapshotMode::default().is_dry_run());
    }

    #[test]
    fn plan_lists_notebook_then_cache() {
        let snapshotter = Snapshotter::local(SnapshotLayout::new("/does/not/exist"));
        let plan = snapshotter.plan("v3");
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].kind, ActionKind::CopyFile);
        assert_eq!(plan[1].kind, ActionKind::CopyTree);
        assert!(plan.iter().all(|a| !a.replaced));
        assert_eq!(
            plan[0].to_string(),
            "'/does/not/exist/index.ipynb' to '/does/not/exist/index_v3.ipynb'"
        );
    }
}
