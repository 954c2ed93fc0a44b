//! NBV Snapshot Operation
//!
//! Copies the canonical notebook and its freeze cache to version-suffixed
//! names:
//!
//! ```text
//! index.ipynb    → index_{suffix}.ipynb
//! _freeze/index/ → _freeze/index_{suffix}/
//! ```
//!
//! Copies replace their destination; they never merge into it. A dry run
//! reports the same actions without touching the filesystem.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod fs;
pub mod layout;
pub mod snapshot;

pub use error::SnapshotError;
pub use fs::{Filesystem, LocalFilesystem};
pub use layout::SnapshotLayout;
pub use snapshot::{ActionKind, SnapshotAction, SnapshotMode, SnapshotReport, Snapshotter};
