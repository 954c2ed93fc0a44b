//! Site configuration document
//!
//! The document is held as an order-preserving [`serde_yaml::Value`]; only
//! the navbar list is ever reached into, so unknown keys and sibling items
//! round-trip unchanged.

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::error::MenuError;

const NAVBAR_LEFT: [&str; 3] = ["website", "navbar", "left"];

/// Quarto site configuration (`_quarto.yml`)
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Value,
}

impl ConfigDocument {
    /// Wrap an already parsed value
    ///
    /// # Errors
    /// Returns [`MenuError::NotAMapping`] unless the root is a mapping.
    pub fn from_value(root: Value) -> Result<Self, MenuError> {
        if !root.is_mapping() {
            return Err(MenuError::NotAMapping);
        }
        Ok(Self { root })
    }

    /// Parse YAML text
    ///
    /// # Errors
    /// Returns [`MenuError::Syntax`] for invalid YAML and
    /// [`MenuError::NotAMapping`] for an empty or scalar document.
    pub fn parse(content: &str) -> Result<Self, MenuError> {
        if content.trim().is_empty() {
            return Err(MenuError::NotAMapping);
        }
        let root: Value = serde_yaml::from_str(content)?;
        Self::from_value(root)
    }

    /// Read and parse a file
    ///
    /// # Errors
    /// Returns [`MenuError::Read`] if the file cannot be read, otherwise as
    /// [`ConfigDocument::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| MenuError::read(path, e))?;
        tracing::debug!("Loaded configuration document {}", path.display());
        Self::parse(&content)
    }

    /// Serialize to YAML text, keeping key order and non-ASCII text verbatim
    ///
    /// # Errors
    /// Returns [`MenuError::Syntax`] if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String, MenuError> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Serialize and write to a file
    ///
    /// # Errors
    /// Returns [`MenuError::Write`] if the file cannot be written.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<(), MenuError> {
        let path = path.as_ref();
        let yaml = self.to_yaml_string()?;
        fs::write(path, yaml).map_err(|e| MenuError::write(path, e))?;
        tracing::debug!("Wrote configuration document {}", path.display());
        Ok(())
    }

    /// Underlying YAML value
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Consume into the underlying YAML value
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Top-level navbar items (`website.navbar.left`)
    ///
    /// # Errors
    /// Returns [`MenuError::MissingPath`] if any segment is absent or the
    /// leaf is not a sequence.
    pub fn navbar_items(&self) -> Result<&[Value], MenuError> {
        let mut current = &self.root;
        for segment in NAVBAR_LEFT {
            current = current.get(segment).ok_or_else(missing_navbar)?;
        }
        current
            .as_sequence()
            .map(Vec::as_slice)
            .ok_or_else(missing_navbar)
    }

    pub(crate) fn navbar_items_mut(&mut self) -> Result<&mut Vec<Value>, MenuError> {
        let mut current = &mut self.root;
        for segment in NAVBAR_LEFT {
            current = current.get_mut(segment).ok_or_else(missing_navbar)?;
        }
        current.as_sequence_mut().ok_or_else(missing_navbar)
    }
}

fn missing_navbar() -> MenuError {
    MenuError::MissingPath(NAVBAR_LEFT.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SITE: &str = r#"project:
  type: website
website:
  title: Métodos numéricos
  navbar:
    left:
    - text: Home
      href: index.ipynb
    - text: version-control
      menu:
      - text: v02 (latest)
        href: index.ipynb
format:
  html:
    theme: cosmo
"#;

    #[test]
    fn parse_and_reach_navbar() {
        let doc = ConfigDocument::parse(SITE).unwrap();
        assert_eq!(doc.navbar_items().unwrap().len(), 2);
    }

    #[test]
    fn empty_document_is_rejected() {
        assert!(matches!(
            ConfigDocument::parse(""),
            Err(MenuError::NotAMapping)
        ));
        assert!(matches!(
            ConfigDocument::parse("just a string"),
            Err(MenuError::NotAMapping)
        ));
    }

    #[test]
    fn missing_navbar_is_reported_with_path() {
        let doc = ConfigDocument::parse("website:\n  title: x\n").unwrap();
        let err = doc.navbar_items().unwrap_err();
        assert!(err.to_string().contains("website.navbar.left"));
    }

    #[test]
    fn navbar_left_must_be_a_sequence() {
        let doc = ConfigDocument::parse("website:\n  navbar:\n    left: nope\n").unwrap();
        assert!(matches!(doc.navbar_items(), Err(MenuError::MissingPath(_))));
    }

    #[test]
    fn serialization_keeps_order_and_unicode() {
        let doc = ConfigDocument::parse(SITE).unwrap();
        let out = doc.to_yaml_string().unwrap();
        assert!(out.contains("Métodos numéricos"));

        let project = out.find("project:").unwrap();
        let website = out.find("website:").unwrap();
        let format = out.find("format:").unwrap();
        assert!(project < website && website < format);

        assert_eq!(ConfigDocument::parse(&out).unwrap(), doc);
    }

    #[test]
    fn load_and_dump_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_quarto.yml");
        std::fs::write(&path, SITE).unwrap();

        let doc = ConfigDocument::load(&path).unwrap();
        let copy = dir.path().join("copy.yml");
        doc.dump(&copy).unwrap();

        assert_eq!(ConfigDocument::load(&copy).unwrap(), doc);
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigDocument::load(dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, MenuError::Read { .. }));
    }
}
