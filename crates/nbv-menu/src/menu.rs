//! Version-control entry operations
//!
//! Finds the navbar item hosting the version submenu, reads the current
//! latest version from it, and replaces its submenu in place.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::document::ConfigDocument;
use crate::error::MenuError;
use crate::item::{raw_label, MenuItem};
use crate::naming::versioned_file_name;
use crate::tag::Tag;
use crate::version::VersionNumber;

/// Substrings that identify menu entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuMarkers {
    /// Marks the navbar item that hosts the version submenu
    pub version_entry: String,
    /// Marks the newest submenu entry
    pub latest: String,
}

impl Default for MenuMarkers {
    fn default() -> Self {
        Self {
            version_entry: "version-control".to_string(),
            latest: "(latest)".to_string(),
        }
    }
}

/// Version submenu editor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionMenu {
    markers: MenuMarkers,
}

impl VersionMenu {
    /// Create with custom markers
    #[inline]
    #[must_use]
    pub fn new(markers: MenuMarkers) -> Self {
        Self { markers }
    }

    /// Markers in use
    #[inline]
    #[must_use]
    pub fn markers(&self) -> &MenuMarkers {
        &self.markers
    }

    /// The version-control entry, typed
    ///
    /// # Errors
    /// - [`MenuError::MissingPath`] if the navbar list is absent
    /// - [`MenuError::VersionEntryNotFound`] if no item carries the marker
    /// - [`MenuError::AmbiguousVersionEntry`] if several do
    pub fn find_entry(&self, document: &ConfigDocument) -> Result<MenuItem, MenuError> {
        let items = document.navbar_items()?;
        let index = self.entry_index(items)?;
        MenuItem::from_value(&items[index])
    }

    /// Raw submenu of the version-control entry, empty when it has none
    ///
    /// # Errors
    /// As [`VersionMenu::find_entry`], minus the item conversion.
    pub fn raw_submenu<'d>(&self, document: &'d ConfigDocument) -> Result<&'d [Value], MenuError> {
        let items = document.navbar_items()?;
        let index = self.entry_index(items)?;
        Ok(items[index]
            .get("menu")
            .and_then(Value::as_sequence)
            .map_or(&[][..], Vec::as_slice))
    }

    /// Current latest version number
    ///
    /// Only labels are inspected; other submenu entries may hold anything.
    ///
    /// # Errors
    /// As [`VersionMenu::raw_submenu`], plus [`MenuError::LatestNotFound`] when
    /// no submenu item carries the latest marker and
    /// [`MenuError::InvalidVersion`] when its label does not start with
    /// `v<integer>`.
    pub fn latest_version(&self, document: &ConfigDocument) -> Result<VersionNumber, MenuError> {
        let latest = self
            .raw_submenu(document)?
            .iter()
            .map(raw_label)
            .find(|label| label.contains(self.markers.latest.as_str()))
            .ok_or_else(|| MenuError::LatestNotFound {
                marker: self.markers.latest.clone(),
            })?;
        VersionNumber::from_label(latest)
    }

    /// Replace the version-control entry's submenu
    ///
    /// The `menu` key keeps its position inside the entry; every other key,
    /// sibling item and document section is left as is.
    ///
    /// # Errors
    /// As [`VersionMenu::find_entry`].
    pub fn write_submenu(
        &self,
        document: &mut ConfigDocument,
        items: &[MenuItem],
    ) -> Result<(), MenuError> {
        let menu = items
            .iter()
            .map(MenuItem::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.write_raw_submenu(document, menu)
    }

    /// Replace the version-control entry's submenu with raw nodes
    ///
    /// # Errors
    /// As [`VersionMenu::write_submenu`].
    pub fn write_raw_submenu(
        &self,
        document: &mut ConfigDocument,
        menu: Vec<Value>,
    ) -> Result<(), MenuError> {
        let count = menu.len();
        let navbar = document.navbar_items_mut()?;
        let index = self.entry_index(navbar)?;
        let entry = navbar[index]
            .as_mapping_mut()
            .ok_or_else(|| MenuError::InvalidItem("version entry is not a mapping".to_string()))?;
        entry.insert(Value::String("menu".to_string()), Value::Sequence(menu));

        tracing::debug!("Wrote {count} version menu items");
        Ok(())
    }

    /// Submenu listing every tag, newest first
    ///
    /// Every entry, the latest included, points at its own versioned notebook.
    #[must_use]
    pub fn history_items(&self, tags: &[Tag], notebook: &str) -> Vec<MenuItem> {
        let mut sorted = tags.to_vec();
        Tag::sort_descending(&mut sorted);

        sorted
            .iter()
            .enumerate()
            .map(|(position, tag)| {
                let href = versioned_file_name(notebook, tag.as_str());
                if position == 0 {
                    MenuItem::link(format!("{tag} {}", self.markers.latest), href)
                } else {
                    MenuItem::link(tag.as_str(), href)
                }
            })
            .collect()
    }

    /// Submenu after a bump from `current` to `next`
    ///
    /// The new latest entry points at the canonical notebook, the demoted
    /// entry at its versioned copy; `existing[1..]` follows verbatim.
    ///
    /// # Errors
    /// Returns [`MenuError::InvalidItem`] if a new link cannot be serialized.
    pub fn bumped_submenu(
        &self,
        current: VersionNumber,
        next: VersionNumber,
        existing: &[Value],
        notebook: &str,
    ) -> Result<Vec<Value>, MenuError> {
        let current_label = current.to_string();
        let mut menu = Vec::with_capacity(existing.len() + 1);
        menu.push(MenuItem::link(format!("{next} {}", self.markers.latest), notebook).to_value()?);
        menu.push(
            MenuItem::link(
                current_label.as_str(),
                versioned_file_name(notebook, &current_label),
            )
            .to_value()?,
        );
        menu.extend(existing.iter().skip(1).cloned());
        Ok(menu)
    }

    fn entry_index(&self, items: &[Value]) -> Result<usize, MenuError> {
        let marker = &self.markers.version_entry;
        let mut matches = items
            .iter()
            .enumerate()
            .filter(|(_, item)| raw_label(item).contains(marker.as_str()))
            .map(|(index, _)| index);

        let first = matches.next().ok_or_else(|| MenuError::VersionEntryNotFound {
            marker: marker.clone(),
        })?;
        let extra = matches.count();
        if extra > 0 {
            return Err(MenuError::AmbiguousVersionEntry {
                marker: marker.clone(),
                count: extra + 1,
            });
        }
        Ok(first)
    }
}

/// [`VersionMenu::find_entry`] with the default markers
///
/// # Errors
/// See [`VersionMenu::find_entry`].
pub fn find_version_entry(document: &ConfigDocument) -> Result<MenuItem, MenuError> {
    VersionMenu::default().find_entry(document)
}

/// [`VersionMenu::latest_version`] with the default markers
///
/// # Errors
/// See [`VersionMenu::latest_version`].
pub fn read_latest_version(document: &ConfigDocument) -> Result<VersionNumber, MenuError> {
    VersionMenu::default().latest_version(document)
}

/// [`VersionMenu::write_submenu`] with the default markers
///
/// # Errors
/// See [`VersionMenu::write_submenu`].
pub fn write_submenu(document: &mut ConfigDocument, items: &[MenuItem]) -> Result<(), MenuError> {
    VersionMenu::default().write_submenu(document, items)
}
