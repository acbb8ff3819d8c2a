//! Transcript normalization.
//!
//! Turns a finished speech-to-text transcript into an ordered, duplicate-free
//! list of stations, and annotates the transcript for the "Heard:" echo.

use serde::Serialize;

use crate::models::{KeywordMap, Station};

/// One transcript word as echoed back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeardWord {
    /// The word as recognized
    pub text: String,
    /// Station the word resolved to, if it is a keyword
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<Station>,
    /// Highlight colour slot for keywords
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<usize>,
}

impl HeardWord {
    /// Whether the word matched a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        self.station.is_some()
    }
}

/// Splits a transcript on runs of whitespace and commas.
pub fn tokenize(transcript: &str) -> impl Iterator<Item = &str> {
    transcript
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}

/// Strips every character outside `[a-zA-Z]` and lowercases the rest.
#[must_use]
pub fn clean_token(token: &str) -> String {
    token
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Normalizes a transcript into stations in first-mention order.
///
/// Unknown words and repeated stations are skipped. An empty transcript, or
/// one with no known words, yields an empty list.
///
/// # Examples
///
/// ```
/// use egghelper::models::{KeywordMap, Station};
/// use egghelper::services::normalize_transcript;
///
/// let mut keywords = KeywordMap::new();
/// keywords.insert("supply", Station::from("Supply Depot"))?;
/// keywords.insert("beds", Station::from("Infirmary"))?;
///
/// let stations = normalize_transcript("Beds, supply... beds", &keywords);
/// assert_eq!(stations, vec![Station::from("Infirmary"), Station::from("Supply Depot")]);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[must_use]
pub fn normalize_transcript(transcript: &str, keywords: &KeywordMap) -> Vec<Station> {
    let mut stations: Vec<Station> = Vec::new();

    for token in tokenize(transcript) {
        let cleaned = clean_token(token);
        if cleaned.is_empty() {
            continue;
        }
        if let Some(station) = keywords.get(&cleaned) {
            if !stations.contains(station) {
                stations.push(station.clone());
            }
        }
    }

    stations
}

/// Annotates every whitespace-separated word of a transcript.
#[must_use]
pub fn annotate_transcript(transcript: &str, keywords: &KeywordMap) -> Vec<HeardWord> {
    transcript
        .split_whitespace()
        .map(|word| {
            let cleaned = clean_token(word);
            HeardWord {
                text: word.to_string(),
                station: keywords.get(&cleaned).cloned(),
                highlight: keywords.highlight_slot(&cleaned),
            }
        })
        .collect()
}
