//! Single-step version bump
//!
//! Reads the current latest version `vNN` from the menu, inserts `vNN+1` as
//! the new latest entry, demotes `vNN` to an archived entry, and snapshots
//! the canonical notebook and cache as `vNN`. Older archived entries are
//! copied through as raw nodes.
//!
//! The menu write and the snapshot are not transactional: a failure between
//! them leaves the configuration updated without the matching snapshot.

use nbv_menu::{ConfigDocument, VersionNumber};
use nbv_snapshot::{Filesystem, SnapshotMode, SnapshotReport, Snapshotter};
use serde::Serialize;

use crate::config::Project;
use crate::error::VersionError;

/// Outcome of a bump
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BumpReport {
    /// Version that was latest before the bump, now archived
    pub previous: VersionNumber,
    /// New latest version
    pub next: VersionNumber,
    /// Snapshot of the archived version
    pub snapshot: SnapshotReport,
}

/// Versions involved in a bump, read from a document
///
/// # Errors
/// Returns [`VersionError::Menu`] if the current version cannot be found or
/// incremented.
pub fn plan_bump(
    project: &Project,
    document: &ConfigDocument,
) -> Result<(VersionNumber, VersionNumber), VersionError> {
    let current = project.menu().latest_version(document)?;
    let next = current.next()?;
    Ok((current, next))
}

/// Bump the version menu and snapshot the previous release
///
/// # Errors
/// - [`VersionError::Menu`] if the document cannot be read, lacks a current
///   version, or cannot be written
/// - [`VersionError::Snapshot`] if the notebook or cache cannot be copied;
///   the document has already been updated at that point
pub fn bump_version<F: Filesystem>(
    project: &Project,
    snapshotter: &Snapshotter<F>,
) -> Result<BumpReport, VersionError> {
    let path = project.config_path();
    let mut document = ConfigDocument::load(&path)?;
    let (current, next) = plan_bump(project, &document)?;

    let menu = project.menu();
    let submenu = menu.bumped_submenu(
        current,
        next,
        menu.raw_submenu(&document)?,
        snapshotter.layout().notebook_href(),
    )?;
    menu.write_raw_submenu(&mut document, submenu)?;
    document.dump(&path)?;
    tracing::info!("Updated YAML: {current} -> {next}");

    let snapshot = snapshotter.snapshot(&current.to_string(), SnapshotMode::Apply)?;
    tracing::info!("Copied files for {current}");

    Ok(BumpReport {
        previous: current,
        next,
        snapshot,
    })
}
