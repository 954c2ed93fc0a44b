//! NBV Version Menu Model
//!
//! Typed access to the version-control entry of a Quarto site configuration
//! (`_quarto.yml`).
//!
//! # Core Operations
//!
//! - **Find**: locate the navbar item hosting the version submenu
//! - **Read**: extract the current `(latest)` version number
//! - **Write**: replace the submenu in place, leaving the rest of the document untouched
//!
//! # Document Shape
//!
//! ```text
//! website:
//!   navbar:
//!     left:
//!       - text: "Docs"
//!         href: docs.qmd
//!       - text: "version-control"
//!         menu:
//!           - text: "v07 (latest)"
//!             href: index.ipynb
//!           - text: "v06"
//!             href: index_v06.ipynb
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use nbv_menu::{ConfigDocument, VersionMenu};
//!
//! let mut doc = ConfigDocument::load("_quarto.yml")?;
//! let menu = VersionMenu::default();
//! let current = menu.latest_version(&doc)?;
//! let next = current.next()?;
//! let submenu = menu.bumped_submenu(current, next, menu.raw_submenu(&doc)?, "index.ipynb")?;
//! menu.write_raw_submenu(&mut doc, submenu)?;
//! doc.dump("_quarto.yml")?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod document;
pub mod error;
pub mod item;
pub mod menu;
pub mod naming;
pub mod tag;
pub mod version;

pub use document::ConfigDocument;
pub use error::{MenuError, MenuResult};
pub use item::MenuItem;
pub use menu::{find_version_entry, read_latest_version, write_submenu, MenuMarkers, VersionMenu};
pub use naming::versioned_file_name;
pub use tag::Tag;
pub use version::VersionNumber;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
