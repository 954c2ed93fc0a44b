//! Testing utilities for NBV workspace
//!
//! Scratch projects, sample site configurations, and a scripted repository
//! whose checkouts rewrite the canonical notebook and cache.

#![allow(missing_docs)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use nbv_core::{Project, ProjectConfig, VcsError, VersionControl};
use nbv_menu::{ConfigDocument, Tag};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Site configuration with `latest` as the current version and `archived`
/// (newest first) below it, between two unrelated navbar items
pub fn site_config(latest: u32, archived: &[u32]) -> String {
    let mut yaml = String::from(
        "project:\n  type: website\nwebsite:\n  title: Métodos Numéricos\n  navbar:\n    left:\n    - text: Home\n      href: index.ipynb\n    - text: version-control\n      menu:\n",
    );
    yaml.push_str(&format!(
        "      - text: v{latest:02} (latest)\n        href: index.ipynb\n"
    ));
    for version in archived {
        yaml.push_str(&format!(
            "      - text: v{version:02}\n        href: index_v{version:02}.ipynb\n"
        ));
    }
    yaml.push_str("    - text: About\n      href: about.qmd\n      icon: info\nformat:\n  html:\n    theme: cosmo\n    toc: true\n");
    yaml
}

/// Notebook body carrying a recognisable marker
pub fn notebook_json(marker: &str) -> String {
    format!(
        "{{\"cells\": [{{\"cell_type\": \"markdown\", \"source\": [\"{marker}\"]}}], \"nbformat\": 4}}"
    )
}

/// A temporary project directory
pub struct ScratchProject {
    dir: TempDir,
}

impl ScratchProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Project with a site configuration, notebook and freeze cache
    pub fn with_site(config: &str, notebook: &str) -> Self {
        let scratch = Self::new();
        scratch.write("_quarto.yml", config);
        scratch.write("index.ipynb", notebook);
        scratch.write("_freeze/index/execute-results/html.json", "{\"engine\": \"jupyter\"}");
        scratch
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    pub fn config(&self) -> ConfigDocument {
        ConfigDocument::load(self.path("_quarto.yml")).unwrap()
    }

    pub fn project(&self) -> Project {
        Project::new(self.root(), ProjectConfig::default())
    }

    /// Every file under the root with its content, sorted by path
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        let mut out: Vec<_> = WalkDir::new(self.root())
            .into_iter()
            .map(Result::unwrap)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                let relative = entry
                    .path()
                    .strip_prefix(self.root())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                (relative, fs::read(entry.path()).unwrap())
            })
            .collect();
        out.sort();
        out
    }
}

impl Default for ScratchProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Working-tree contents of one revision
#[derive(Debug, Clone)]
pub struct Revision {
    pub notebook: String,
    pub cache: Vec<(String, String)>,
}

impl Revision {
    pub fn new(notebook: impl Into<String>) -> Self {
        Self {
            notebook: notebook.into(),
            cache: Vec::new(),
        }
    }

    pub fn with_cache_file(mut self, relative: &str, content: &str) -> Self {
        self.cache.push((relative.to_string(), content.to_string()));
        self
    }
}

/// In-memory repository that materialises revisions into a project root
///
/// `checkout` replaces `index.ipynb` and `_freeze/index` with the contents
/// recorded for the reference.
pub struct ScriptedRepository {
    root: PathBuf,
    tags: Vec<Tag>,
    revisions: BTreeMap<String, Revision>,
    head: RefCell<String>,
    failing: HashSet<String>,
    checkouts: RefCell<Vec<String>>,
}

impl ScriptedRepository {
    /// Repository on `branch`, whose contents are whatever is on disk now
    pub fn new(root: &Path, branch: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            tags: Vec::new(),
            revisions: BTreeMap::new(),
            head: RefCell::new(branch.to_string()),
            failing: HashSet::new(),
            checkouts: RefCell::new(Vec::new()),
        }
    }

    pub fn with_tag(mut self, tag: &str, revision: Revision) -> Self {
        self.tags.push(Tag::from(tag));
        self.revisions.insert(tag.to_string(), revision);
        self
    }

    pub fn with_revision(mut self, reference: &str, revision: Revision) -> Self {
        self.revisions.insert(reference.to_string(), revision);
        self
    }

    pub fn failing_on(mut self, reference: &str) -> Self {
        self.failing.insert(reference.to_string());
        self
    }

    pub fn head(&self) -> String {
        self.head.borrow().clone()
    }

    pub fn checkouts(&self) -> Vec<String> {
        self.checkouts.borrow().clone()
    }

    fn materialise(&self, revision: &Revision) {
        fs::write(self.root.join("index.ipynb"), &revision.notebook).unwrap();
        let cache = self.root.join("_freeze/index");
        if cache.exists() {
            fs::remove_dir_all(&cache).unwrap();
        }
        fs::create_dir_all(&cache).unwrap();
        for (relative, content) in &revision.cache {
            let path = cache.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }
}

impl VersionControl for ScriptedRepository {
    fn list_tags(&self) -> Result<Vec<Tag>, VcsError> {
        Ok(self.tags.clone())
    }

    fn checkout(&self, reference: &str) -> Result<(), VcsError> {
        self.checkouts.borrow_mut().push(reference.to_string());
        if self.failing.contains(reference) {
            return Err(VcsError::CommandFailed {
                command: format!("git checkout --quiet {reference}"),
                status: "exit status: 1".to_string(),
                stderr: format!("error: pathspec '{reference}' did not match"),
            });
        }
        if let Some(revision) = self.revisions.get(reference) {
            self.materialise(revision);
        }
        *self.head.borrow_mut() = reference.to_string();
        Ok(())
    }

    fn current_ref(&self) -> Result<String, VcsError> {
        Ok(self.head())
    }
}
