//! Station names used by every tool of a map.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named location on the map (Supply Depot, Infirmary, ...).
///
/// Stations carry no attributes beyond their display name. The set of
/// stations for a map is fixed by the catalog and never changes at runtime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Station(String);

impl Station {
    /// Creates a station from its display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the display name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a free-form name.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name.trim())
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Station {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for Station {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_name_ignores_case_and_padding() {
        let station = Station::new("Supply Depot");
        assert!(station.matches_name("supply depot"));
        assert!(station.matches_name("  SUPPLY DEPOT "));
        assert!(!station.matches_name("supply"));
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Station::from("Armory").to_string(), "Armory");
    }
}
