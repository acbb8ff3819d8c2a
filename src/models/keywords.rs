//! Keyword map used to turn spoken words into stations.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;

use super::Station;

/// Number of highlight colours used to echo matched words.
pub const HIGHLIGHT_PALETTE_SIZE: usize = 10;

/// Keywords for one station, sorted alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordGroup {
    /// Station the keywords resolve to
    pub station: Station,
    /// Sorted keywords
    pub keywords: Vec<String>,
}

/// Many-to-one mapping from lowercase words to stations.
///
/// Keywords keep their declaration order; that order gives every keyword a
/// stable index, which the UI uses to pick a highlight colour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordMap {
    /// Keywords in declaration order
    entries: Vec<(String, Station)>,
    /// Fast lookup by keyword
    lookup: HashMap<String, usize>,
}

impl KeywordMap {
    /// Creates an empty keyword map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a keyword for a station.
    ///
    /// # Errors
    ///
    /// Returns an error if the keyword is empty, contains anything other than
    /// ASCII letters, or is already mapped.
    pub fn insert(&mut self, keyword: &str, station: Station) -> Result<()> {
        let keyword = keyword.to_ascii_lowercase();

        if keyword.is_empty() {
            anyhow::bail!("Keyword for '{station}' cannot be empty");
        }

        if !keyword.chars().all(|c| c.is_ascii_alphabetic()) {
            anyhow::bail!("Keyword '{keyword}' must contain ASCII letters only");
        }

        if let Some(&idx) = self.lookup.get(&keyword) {
            anyhow::bail!(
                "Keyword '{keyword}' is mapped twice ('{}' and '{station}')",
                self.entries[idx].1
            );
        }

        self.lookup.insert(keyword.clone(), self.entries.len());
        self.entries.push((keyword, station));
        Ok(())
    }

    /// Looks up a cleaned word. Matching is exact and case-insensitive.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&Station> {
        self.index_of(word).map(|idx| &self.entries[idx].1)
    }

    /// Declaration index of a keyword, if known.
    #[must_use]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        if word.bytes().any(|b| b.is_ascii_uppercase()) {
            self.lookup.get(&word.to_ascii_lowercase()).copied()
        } else {
            self.lookup.get(word).copied()
        }
    }

    /// Highlight colour slot for a keyword.
    #[must_use]
    pub fn highlight_slot(&self, word: &str) -> Option<usize> {
        self.index_of(word).map(|idx| idx % HIGHLIGHT_PALETTE_SIZE)
    }

    /// Iterates keywords in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Station)> {
        self.entries.iter().map(|(word, station)| (word.as_str(), station))
    }

    /// Number of keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no keywords.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keywords grouped by station.
    ///
    /// Groups appear in the order their station is first mentioned; the
    /// keywords inside a group are sorted.
    #[must_use]
    pub fn grouped(&self) -> Vec<KeywordGroup> {
        let mut groups: Vec<KeywordGroup> = Vec::new();

        for (word, station) in &self.entries {
            match groups.iter_mut().find(|g| &g.station == station) {
                Some(group) => group.keywords.push(word.clone()),
                None => groups.push(KeywordGroup {
                    station: station.clone(),
                    keywords: vec![word.clone()],
                }),
            }
        }

        for group in &mut groups {
            group.keywords.sort();
        }

        groups
    }
}
