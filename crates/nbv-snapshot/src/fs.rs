//! Filesystem collaborator
//!
//! The snapshot operation only needs a handful of primitives; keeping them
//! behind a trait lets tests observe exactly which mutations happen.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Filesystem primitives used by snapshots
pub trait Filesystem {
    /// Copy a single file, overwriting the destination
    ///
    /// Content, permissions and modification time are carried over.
    ///
    /// # Errors
    /// Any underlying IO error.
    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()>;

    /// Recursively copy a directory into a destination that does not exist yet
    ///
    /// # Errors
    /// Any underlying IO error.
    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()>;

    /// Recursively remove a directory
    ///
    /// # Errors
    /// Any underlying IO error.
    fn remove_tree(&self, path: &Path) -> io::Result<()>;

    /// True if anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// True if `path` is a directory
    fn is_dir(&self, path: &Path) -> bool;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()> {
        (**self).copy_file(src, dst)
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()> {
        (**self).copy_tree(src, dst)
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        (**self).remove_tree(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()> {
        copy_preserving(src, dst)
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()> {
        for entry in WalkDir::new(src).follow_links(true) {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(src)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            let target = dst.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                copy_preserving(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Copy content, then modification time and permissions; directory
/// timestamps are not carried over
fn copy_preserving(src: &Path, dst: &Path) -> io::Result<()> {
    let metadata = fs::metadata(src)?;
    let mut reader = File::open(src)?;
    let mut writer = File::create(dst)?;
    io::copy(&mut reader, &mut writer)?;
    writer.set_modified(metadata.modified()?)?;
    drop(writer);
    fs::set_permissions(dst, metadata.permissions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn age(path: &Path) -> SystemTime {
        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_500_000_000);
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(modified)
            .unwrap();
        modified
    }

    fn modified(path: &Path) -> SystemTime {
        fs::metadata(path).unwrap().modified().unwrap()
    }

    #[test]
    fn copy_file_keeps_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("index.ipynb");
        fs::write(&src, "{}").unwrap();
        let stamp = age(&src);

        let dst = dir.path().join("index_v1.ipynb");
        LocalFilesystem.copy_file(&src, &dst).unwrap();

        assert_eq!(modified(&dst), stamp);
    }

    #[test]
    fn copy_tree_keeps_file_modification_times() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("execute-results")).unwrap();
        let file = src.join("execute-results/html.json");
        fs::write(&file, "{}").unwrap();
        let stamp = age(&file);

        let dst = dir.path().join("dst");
        LocalFilesystem.copy_tree(&src, &dst).unwrap();

        assert_eq!(modified(&dst.join("execute-results/html.json")), stamp);
    }

    #[test]
    fn copy_tree_copies_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("a/b")).unwrap();
        fs::write(src.join("top.json"), "{}").unwrap();
        fs::write(src.join("a/b/deep.json"), "[1]").unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();

        let dst = dir.path().join("dst");
        LocalFilesystem.copy_tree(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("top.json")).unwrap(), "{}");
        assert_eq!(fs::read_to_string(dst.join("a/b/deep.json")).unwrap(), "[1]");
        assert!(dst.join("empty").is_dir());
    }

    #[test]
    fn copy_tree_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = LocalFilesystem.copy_tree(&dir.path().join("nope"), &dir.path().join("dst"));
        assert!(result.is_err());
    }

    #[test]
    fn copy_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let dst = dir.path().join("b.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old content").unwrap();

        LocalFilesystem.copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
    }
}
