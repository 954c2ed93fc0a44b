//! Error types for NBV procedures
//!
//! Provides error handling for:
//! - Version-control commands
//! - Project configuration files
//! - The rebuild and bump procedures as a whole

use std::path::PathBuf;

use nbv_menu::MenuError;
use nbv_snapshot::SnapshotError;

/// Version-control collaborator errors
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    /// The command could not be started
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command exited unsuccessfully
    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The command printed something unusable
    #[error("unexpected output from `{command}`: {message}")]
    InvalidOutput { command: String, message: String },
}

/// Project configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("io error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`crate::ProjectConfig`]
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Combined procedure error
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// The repository has no tags to rebuild from
    #[error("no tags found")]
    NoTags,

    /// Reading or editing the version menu failed
    #[error("menu error: {0}")]
    Menu(#[from] MenuError),

    /// Copying the notebook or cache failed
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// A git operation failed
    #[error("version control error: {0}")]
    Vcs(#[from] VcsError),

    /// Settings file could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl VersionError {
    /// True for failures caused by the project state rather than a
    /// collaborator (no tags, no current version, malformed menu)
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        match self {
            Self::NoTags => true,
            Self::Menu(e) => e.is_precondition(),
            Self::Snapshot(SnapshotError::MissingSource(_)) => true,
            _ => false,
        }
    }
}

/// Result type alias for NBV procedures
pub type VersionResult<T> = Result<T, VersionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tags_display() {
        assert_eq!(VersionError::NoTags.to_string(), "no tags found");
        assert!(VersionError::NoTags.is_precondition());
    }

    #[test]
    fn menu_error_conversion() {
        let err: VersionError = MenuError::LatestNotFound {
            marker: "(latest)".to_string(),
        }
        .into();
        assert!(matches!(err, VersionError::Menu(_)));
        assert!(err.is_precondition());
    }

    #[test]
    fn vcs_failure_is_not_a_precondition() {
        let err: VersionError = VcsError::CommandFailed {
            command: "git checkout v1".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "error: pathspec 'v1' did not match".to_string(),
        }
        .into();
        assert!(!err.is_precondition());
        assert!(err.to_string().contains("git checkout v1"));
    }
}
