//! Error types for the version menu model
//!
//! Covers:
//! - Loading and saving the configuration document
//! - Locating the version-control entry
//! - Parsing version labels

use std::path::PathBuf;

/// Errors raised while reading or editing the version menu
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// IO error while reading the document
    #[error("io error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error while writing the document
    #[error("io error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML syntax error
    #[error("yaml syntax error: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// Document root is empty or not a mapping
    #[error("configuration document root must be a mapping")]
    NotAMapping,

    /// A required key path is absent or has the wrong shape
    #[error("missing or malformed '{0}' in configuration document")]
    MissingPath(String),

    /// No navbar item carries the version marker
    #[error("no navbar item with text containing '{marker}'")]
    VersionEntryNotFound { marker: String },

    /// Several navbar items carry the version marker
    #[error("{count} navbar items with text containing '{marker}', expected exactly one")]
    AmbiguousVersionEntry { marker: String, count: usize },

    /// The version submenu has no entry carrying the latest marker
    #[error("could not find current version: no submenu entry containing '{marker}'")]
    LatestNotFound { marker: String },

    /// A version label does not start with `v<integer>`
    #[error("invalid version label '{0}'")]
    InvalidVersion(String),

    /// The next version number does not fit
    #[error("version number {0} cannot be incremented")]
    VersionOverflow(u32),

    /// A menu item could not be converted to or from its typed form
    #[error("invalid menu item: {0}")]
    InvalidItem(String),
}

impl MenuError {
    /// Create read error for path
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create write error for path
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// True when the document itself is missing something the procedures need
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingPath(_)
                | Self::VersionEntryNotFound { .. }
                | Self::AmbiguousVersionEntry { .. }
                | Self::LatestNotFound { .. }
                | Self::InvalidVersion(_)
        )
    }
}

/// Result type alias for menu operations
pub type MenuResult<T> = Result<T, MenuError>;
