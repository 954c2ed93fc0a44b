//! Project configuration
//!
//! Defaults match a standard Quarto notebook site; an optional `nbv.toml`
//! in the project root overrides any of them.

use std::fs;
use std::path::{Path, PathBuf};

use nbv_menu::{MenuMarkers, VersionMenu};
use nbv_snapshot::{Filesystem, SnapshotLayout, Snapshotter};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::vcs::GitCli;

/// Settings file looked up in the project root
pub const SETTINGS_FILE: &str = "nbv.toml";

/// File names and markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Site configuration document, relative to the root
    pub config_file: String,
    /// Canonical notebook, relative to the root
    pub notebook: String,
    /// Canonical freeze cache directory, relative to the root
    pub cache_dir: String,
    /// Substring identifying the version-control navbar item
    pub version_marker: String,
    /// Substring identifying the latest submenu entry
    pub latest_marker: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let markers = MenuMarkers::default();
        Self {
            config_file: "_quarto.yml".to_string(),
            notebook: SnapshotLayout::DEFAULT_NOTEBOOK.to_string(),
            cache_dir: SnapshotLayout::DEFAULT_CACHE_DIR.to_string(),
            version_marker: markers.version_entry,
            latest_marker: markers.latest,
        }
    }
}

impl ProjectConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML settings
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for invalid TOML or unknown value types.
    pub fn from_toml(content: &str, origin: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.into(),
            source,
        })
    }

    /// Load settings from a file
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load `nbv.toml` from `root` if present, defaults otherwise
    ///
    /// # Errors
    /// As [`ProjectConfig::load`] when the file exists.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = root.as_ref().join(SETTINGS_FILE);
        if path.is_file() {
            tracing::debug!("Using settings from {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// With site configuration document
    #[inline]
    #[must_use]
    pub fn with_config_file(mut self, config_file: impl Into<String>) -> Self {
        self.config_file = config_file.into();
        self
    }

    /// With canonical notebook
    #[inline]
    #[must_use]
    pub fn with_notebook(mut self, notebook: impl Into<String>) -> Self {
        self.notebook = notebook.into();
        self
    }

    /// With canonical cache directory
    #[inline]
    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: impl Into<String>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Menu markers
    #[inline]
    #[must_use]
    pub fn markers(&self) -> MenuMarkers {
        MenuMarkers {
            version_entry: self.version_marker.clone(),
            latest: self.latest_marker.clone(),
        }
    }
}

/// A project root with its configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
    config: ProjectConfig,
}

impl Project {
    /// Create from root and configuration
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Open `root`, picking up `nbv.toml` if present
    ///
    /// # Errors
    /// See [`ProjectConfig::discover`].
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let root = root.into();
        let config = ProjectConfig::discover(&root)?;
        Ok(Self::new(root, config))
    }

    /// Project root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Site configuration document on disk
    #[inline]
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(&self.config.config_file)
    }

    /// Snapshot layout
    #[must_use]
    pub fn layout(&self) -> SnapshotLayout {
        SnapshotLayout::new(&self.root)
            .with_notebook(self.config.notebook.clone())
            .with_cache_dir(self.config.cache_dir.clone())
    }

    /// Version menu editor
    #[inline]
    #[must_use]
    pub fn menu(&self) -> VersionMenu {
        VersionMenu::new(self.config.markers())
    }

    /// Snapshotter over `fs`
    #[inline]
    #[must_use]
    pub fn snapshotter<F: Filesystem>(&self, fs: F) -> Snapshotter<F> {
        Snapshotter::new(fs, self.layout())
    }

    /// Git working tree at the project root
    #[inline]
    #[must_use]
    pub fn git(&self) -> GitCli {
        GitCli::new(&self.root)
    }
}
