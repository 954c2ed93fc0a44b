//! NBV Core
//!
//! The two maintenance procedures of a versioned notebook publication:
//!
//! - **Rebuild**: check out every git tag, snapshot its notebook and freeze
//!   cache under the tag name, and list all tags in the version menu
//! - **Bump**: archive the current latest version under `vNN` and announce
//!   `vNN+1` as the new latest
//!
//! # Architecture
//!
//! ```text
//! VersionControl ─┐
//!                 ├─→ rebuild_history ─→ Snapshotter ─→ Filesystem
//! CheckoutGuard ──┘          │
//!                            └──────→ VersionMenu ─→ ConfigDocument
//! bump_version ──→ VersionMenu, Snapshotter
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use nbv_core::prelude::*;
//!
//! let project = Project::open(".")?;
//! let snapshotter = project.snapshotter(LocalFilesystem);
//! let report = rebuild_history(&project, &project.git(), &snapshotter, SnapshotMode::DryRun)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod bump;
pub mod checkout;
pub mod config;
pub mod error;
pub mod rebuild;
pub mod vcs;

pub use bump::{bump_version, plan_bump, BumpReport};
pub use checkout::CheckoutGuard;
pub use config::{Project, ProjectConfig, SETTINGS_FILE};
pub use error::{ConfigError, VcsError, VersionError, VersionResult};
pub use rebuild::{rebuild_history, RebuildReport};
pub use vcs::{GitCli, VersionControl};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running the procedures
    pub use crate::bump::{bump_version, BumpReport};
    pub use crate::config::{Project, ProjectConfig};
    pub use crate::error::{VersionError, VersionResult};
    pub use crate::rebuild::{rebuild_history, RebuildReport};
    pub use crate::vcs::{GitCli, VersionControl};
    pub use nbv_menu::{ConfigDocument, MenuItem, Tag, VersionMenu, VersionNumber};
    pub use nbv_snapshot::{LocalFilesystem, SnapshotMode, Snapshotter};
}
