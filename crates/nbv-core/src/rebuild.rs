//! Multi-tag history rebuild
//!
//! For every tag: check it out and snapshot the notebook and cache under the
//! tag name. Then restore the original revision and rewrite the version menu
//! so it lists every tag, newest first.

use nbv_menu::{ConfigDocument, MenuItem, Tag};
use nbv_snapshot::{Filesystem, SnapshotMode, SnapshotReport, Snapshotter};
use serde::Serialize;

use crate::checkout::CheckoutGuard;
use crate::config::Project;
use crate::error::VersionError;
use crate::vcs::VersionControl;

/// Outcome of a history rebuild
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebuildReport {
    /// Tags in the order they were processed
    pub tags: Vec<Tag>,
    /// The version submenu that was (or would be) written
    pub menu: Vec<MenuItem>,
    /// One snapshot per tag
    pub snapshots: Vec<SnapshotReport>,
    /// Revision checked out again at the end
    pub restored: String,
    /// Whether this was a dry run
    pub dry_run: bool,
}

/// Rebuild every tagged snapshot and the version menu
///
/// # Errors
/// - [`VersionError::NoTags`] if the repository has no tags
/// - [`VersionError::Vcs`] if a checkout fails
/// - [`VersionError::Snapshot`] if a tagged revision lacks the notebook or cache
/// - [`VersionError::Menu`] if the configuration document cannot be updated
///
/// The original revision is checked out again on every path once it has
/// been recorded.
pub fn rebuild_history<V, F>(
    project: &Project,
    vcs: &V,
    snapshotter: &Snapshotter<F>,
    mode: SnapshotMode,
) -> Result<RebuildReport, VersionError>
where
    V: VersionControl + ?Sized,
    F: Filesystem,
{
    let guard = CheckoutGuard::acquire(vcs)?;

    let tags = vcs.list_tags()?;
    if tags.is_empty() {
        return Err(VersionError::NoTags);
    }

    let mut snapshots = Vec::with_capacity(tags.len());
    for tag in &tags {
        tracing::info!("Processing tag {tag}");
        guard.checkout(tag.as_str())?;
        snapshots.push(snapshotter.snapshot(tag.as_str(), mode)?);
    }

    let restored = guard.restore()?;

    let menu = project
        .menu()
        .history_items(&tags, snapshotter.layout().notebook_href());
    update_menu(project, &menu, mode)?;

    Ok(RebuildReport {
        tags,
        menu,
        snapshots,
        restored,
        dry_run: mode.is_dry_run(),
    })
}

fn update_menu(project: &Project, menu: &[MenuItem], mode: SnapshotMode) -> Result<(), VersionError> {
    let path = project.config_path();

    if mode.is_dry_run() {
        tracing::info!(
            "Would update '{}' with the following menu items:",
            path.display()
        );
        for item in menu {
            tracing::info!("  - {} -> {}", item.label(), item.href.as_deref().unwrap_or(""));
        }
        return Ok(());
    }

    let mut document = ConfigDocument::load(&path)?;
    project.menu().write_submenu(&mut document, menu)?;
    document.dump(&path)?;
    tracing::info!("Updated '{}' with {} version entries", path.display(), menu.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;
    use crate::error::VcsError;
    use crate::vcs::MockVersionControl;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use nbv_snapshot::LocalFilesystem;

    fn dry_project() -> (tempfile::TempDir, Project) {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::new(dir.path(), ProjectConfig::default());
        (dir, project)
    }

    #[test]
    fn no_tags_is_fatal_without_any_checkout() {
        let (_dir, project) = dry_project();
        let mut vcs = MockVersionControl::new();
        vcs.expect_current_ref().returning(|| Ok("main".to_string()));
        vcs.expect_list_tags().returning(|| Ok(Vec::new()));
        vcs.expect_checkout().never();

        let snapshotter = project.snapshotter(LocalFilesystem);
        let err = rebuild_history(&project, &vcs, &snapshotter, SnapshotMode::DryRun).unwrap_err();
        assert!(matches!(err, VersionError::NoTags));
    }

    #[test]
    fn tags_processed_in_listing_order() {
        let (_dir, project) = dry_project();
        let mut vcs = MockVersionControl::new();
        let mut seq = Sequence::new();
        vcs.expect_current_ref()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok("main".to_string()));
        vcs.expect_list_tags()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![Tag::from("v2"), Tag::from("v10"), Tag::from("v1")]));
        for reference in ["v2", "v10", "v1", "main"] {
            vcs.expect_checkout()
                .with(eq(reference))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
        }

        let snapshotter = project.snapshotter(LocalFilesystem);
        let report = rebuild_history(&project, &vcs, &snapshotter, SnapshotMode::DryRun).unwrap();

        assert_eq!(report.restored, "main");
        assert!(report.dry_run);
        let suffixes: Vec<_> = report.snapshots.iter().map(|s| s.suffix.as_str()).collect();
        assert_eq!(suffixes, vec!["v2", "v10", "v1"]);
        let labels: Vec<_> = report.menu.iter().map(MenuItem::label).collect();
        assert_eq!(labels, vec!["v10 (latest)", "v2", "v1"]);
        assert_eq!(report.menu[0].href.as_deref(), Some("index_v10.ipynb"));
    }

    #[test]
    fn checkout_failure_still_restores() {
        let (_dir, project) = dry_project();
        let mut vcs = MockVersionControl::new();
        vcs.expect_current_ref().returning(|| Ok("main".to_string()));
        vcs.expect_list_tags()
            .returning(|| Ok(vec![Tag::from("v1"), Tag::from("v2")]));
        vcs.expect_checkout()
            .with(eq("v1"))
            .times(1)
            .returning(|_| Ok(()));
        vcs.expect_checkout()
            .with(eq("v2"))
            .times(1)
            .returning(|reference| {
                Err(VcsError::CommandFailed {
                    command: format!("git checkout --quiet {reference}"),
                    status: "exit status: 1".to_string(),
                    stderr: "error: pathspec did not match".to_string(),
                })
            });
        vcs.expect_checkout()
            .with(eq("main"))
            .times(1)
            .returning(|_| Ok(()));

        let snapshotter = project.snapshotter(LocalFilesystem);
        let err = rebuild_history(&project, &vcs, &snapshotter, SnapshotMode::DryRun).unwrap_err();
        assert!(matches!(err, VersionError::Vcs(_)));
    }

    #[test]
    fn unknown_current_ref_aborts_before_any_checkout() {
        let (_dir, project) = dry_project();
        let mut vcs = MockVersionControl::new();
        vcs.expect_current_ref().returning(|| {
            Err(VcsError::InvalidOutput {
                command: "git rev-parse HEAD".to_string(),
                message: "empty commit id".to_string(),
            })
        });
        vcs.expect_list_tags().never();
        vcs.expect_checkout().never();

        let snapshotter = project.snapshotter(LocalFilesystem);
        assert!(rebuild_history(&project, &vcs, &snapshotter, SnapshotMode::DryRun).is_err());
    }
}
