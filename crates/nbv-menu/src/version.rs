//! Release version numbers
//!
//! Rendered as `v` plus a two-digit, zero-padded integer (`v07`).

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MenuError;

/// Release version number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionNumber(u32);

impl VersionNumber {
    /// Create from raw integer
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw integer value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The following release
    ///
    /// # Errors
    /// Returns [`MenuError::VersionOverflow`] at `u32::MAX`.
    #[inline]
    pub fn next(self) -> Result<Self, MenuError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(MenuError::VersionOverflow(self.0))
    }

    /// Parse the leading token of a menu label such as `v07 (latest)`
    ///
    /// # Errors
    /// Returns [`MenuError::InvalidVersion`] if the label is empty or its
    /// first token is not `v<integer>`.
    pub fn from_label(label: &str) -> Result<Self, MenuError> {
        let token = label
            .split_whitespace()
            .next()
            .ok_or_else(|| MenuError::InvalidVersion(label.to_string()))?;
        token
            .parse()
            .map_err(|_| MenuError::InvalidVersion(label.to_string()))
    }
}

impl Display for VersionNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "v{:02}", self.0)
    }
}

impl FromStr for VersionNumber {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('v').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MenuError::InvalidVersion(s.to_string()));
        }
        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| MenuError::InvalidVersion(s.to_string()))
    }
}

impl From<u32> for VersionNumber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(VersionNumber::new(7).to_string(), "v07");
        assert_eq!(VersionNumber::new(12).to_string(), "v12");
        assert_eq!(VersionNumber::new(123).to_string(), "v123");
        assert_eq!(VersionNumber::new(0).to_string(), "v00");
    }

    #[test]
    fn parse_label_with_marker() {
        let version = VersionNumber::from_label("v07 (latest)").unwrap();
        assert_eq!(version.get(), 7);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(VersionNumber::from_label("").is_err());
        assert!(VersionNumber::from_label("latest").is_err());
        assert!(VersionNumber::from_label("v (latest)").is_err());
        assert!("v-1".parse::<VersionNumber>().is_err());
        assert!("v+1".parse::<VersionNumber>().is_err());
    }

    #[test]
    fn parse_without_prefix() {
        assert_eq!("12".parse::<VersionNumber>().unwrap(), VersionNumber::new(12));
    }

    #[test]
    fn next_increments() {
        assert_eq!(VersionNumber::new(7).next().unwrap(), VersionNumber::new(8));
        assert!(matches!(
            VersionNumber::new(u32::MAX).next(),
            Err(MenuError::VersionOverflow(_))
        ));
    }
}
