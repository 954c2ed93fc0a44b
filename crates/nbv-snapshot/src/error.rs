//! Error types for snapshot operations

use std::path::PathBuf;

/// Errors during snapshot copies
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The canonical notebook or cache is absent
    #[error("snapshot source does not exist: {0}")]
    MissingSource(PathBuf),

    /// A filesystem operation failed
    #[error("io error during {op} on {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SnapshotError {
    /// Create IO error for an operation on a path
    pub fn io_error(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
