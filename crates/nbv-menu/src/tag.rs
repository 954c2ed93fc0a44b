//! Release tags
//!
//! Tags are opaque names, but menus list them newest first, so they carry a
//! natural version ordering: digit runs compare numerically, everything else
//! lexically. `v9` sorts before `v10`, and `v1.2.10` after `v1.2.9`.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+|\D+").expect("static regex"));

/// A named, immutable pointer to a historical revision
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Create from name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Tag name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sort newest first
    pub fn sort_descending(tags: &mut [Tag]) {
        tags.sort_by(|a, b| b.cmp(a));
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self(name)
    }
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = SEGMENT.find_iter(a).map(|m| m.as_str());
    let mut right = SEGMENT.find_iter(b).map(|m| m.as_str());
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = segment_cmp(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn segment_cmp(x: &str, y: &str) -> Ordering {
    let numeric = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if numeric(x) && numeric(y) {
        // Compare by magnitude without parsing, so arbitrarily long runs work.
        let x = x.trim_start_matches('0');
        let y = y.trim_start_matches('0');
        x.len().cmp(&y.len()).then_with(|| x.cmp(y))
    } else {
        x.cmp(y)
    }
}
