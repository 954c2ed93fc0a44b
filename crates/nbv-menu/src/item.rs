//! Navigation menu items
//!
//! Typed view of one navbar entry. Keys other than `text`, `href` and `menu`
//! are kept in [`MenuItem::extra`] so a typed round trip never drops data.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::MenuError;

/// Navbar or submenu item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Target reference (relative file path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Nested items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<Vec<MenuItem>>,
    /// Unrecognised keys, in document order
    #[serde(flatten)]
    pub extra: Mapping,
}

impl MenuItem {
    /// Create a `{text, href}` link
    #[inline]
    #[must_use]
    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// Label, or empty when absent
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// True when the label contains `marker`
    #[inline]
    #[must_use]
    pub fn label_contains(&self, marker: &str) -> bool {
        self.label().contains(marker)
    }

    /// Nested items, or empty when absent
    #[inline]
    #[must_use]
    pub fn submenu(&self) -> &[MenuItem] {
        self.menu.as_deref().unwrap_or(&[])
    }

    /// Convert from a raw YAML node
    ///
    /// # Errors
    /// Returns [`MenuError::InvalidItem`] when the node is not a mapping or a
    /// known key has the wrong type.
    pub fn from_value(value: &Value) -> Result<Self, MenuError> {
        serde_yaml::from_value(value.clone()).map_err(|e| MenuError::InvalidItem(e.to_string()))
    }

    /// Convert to a raw YAML node
    ///
    /// # Errors
    /// Returns [`MenuError::InvalidItem`] if serialization fails.
    pub fn to_value(&self) -> Result<Value, MenuError> {
        serde_yaml::to_value(self).map_err(|e| MenuError::InvalidItem(e.to_string()))
    }
}

/// Label of a raw YAML item, without converting it
pub(crate) fn raw_label(value: &Value) -> &str {
    value.get("text").and_then(Value::as_str).unwrap_or("")
}
