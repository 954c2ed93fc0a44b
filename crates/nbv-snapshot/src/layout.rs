//! Canonical and versioned snapshot paths

use std::path::{Path, PathBuf};

use nbv_menu::versioned_file_name;

/// Where the canonical notebook and cache live, relative to a project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotLayout {
    root: PathBuf,
    notebook: String,
    cache_dir: String,
}

impl SnapshotLayout {
    /// Default notebook name
    pub const DEFAULT_NOTEBOOK: &'static str = "index.ipynb";
    /// Default freeze cache directory
    pub const DEFAULT_CACHE_DIR: &'static str = "_freeze/index";

    /// Layout with default names under `root`
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            notebook: Self::DEFAULT_NOTEBOOK.to_string(),
            cache_dir: Self::DEFAULT_CACHE_DIR.to_string(),
        }
    }

    /// With notebook path (relative, `/`-separated)
    #[inline]
    #[must_use]
    pub fn with_notebook(mut self, notebook: impl Into<String>) -> Self {
        self.notebook = notebook.into();
        self
    }

    /// With cache directory (relative, `/`-separated)
    #[inline]
    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: impl Into<String>) -> Self {
        self.cache_dir = cache_dir.into().trim_end_matches('/').to_string();
        self
    }

    /// Project root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Notebook path as written in menu links
    #[inline]
    #[must_use]
    pub fn notebook_href(&self) -> &str {
        &self.notebook
    }

    /// Versioned notebook path as written in menu links
    #[inline]
    #[must_use]
    pub fn versioned_notebook_href(&self, suffix: &str) -> String {
        versioned_file_name(&self.notebook, suffix)
    }

    /// Canonical notebook on disk
    #[inline]
    #[must_use]
    pub fn notebook_path(&self) -> PathBuf {
        self.root.join(&self.notebook)
    }

    /// Canonical cache directory on disk
    #[inline]
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.root.join(&self.cache_dir)
    }

    /// Versioned notebook on disk
    #[inline]
    #[must_use]
    pub fn versioned_notebook_path(&self, suffix: &str) -> PathBuf {
        self.root.join(self.versioned_notebook_href(suffix))
    }

    /// Versioned cache directory on disk, a sibling of the canonical one
    #[inline]
    #[must_use]
    pub fn versioned_cache_path(&self, suffix: &str) -> PathBuf {
        self.root.join(format!("{}_{suffix}", self.cache_dir))
    }
}
