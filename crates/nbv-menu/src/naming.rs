//! Versioned file naming

use std::path::Path;

/// Insert `_{suffix}` into a file name before its extension
///
/// A leading `dir/` prefix is kept as is.
///
/// # Examples
/// ```
/// # use nbv_menu::versioned_file_name;
/// assert_eq!(versioned_file_name("index.ipynb", "v07"), "index_v07.ipynb");
/// assert_eq!(versioned_file_name("index", "v3"), "index_v3");
/// assert_eq!(versioned_file_name("docs/index.ipynb", "v3"), "docs/index_v3.ipynb");
/// ```
#[must_use]
pub fn versioned_file_name(file_name: &str, suffix: &str) -> String {
    let (dir, name) = match file_name.rsplit_once('/') {
        Some((dir, name)) => (Some(dir), name),
        None => (None, file_name),
    };

    let path = Path::new(name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    let versioned = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_{suffix}.{ext}"),
        None => format!("{stem}_{suffix}"),
    };

    match dir {
        Some(dir) => format!("{dir}/{versioned}"),
        None => versioned,
    }
}
