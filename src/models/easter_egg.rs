//! Easter egg map definitions: the static data behind every tool.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ChecklistItem, KeywordMap, Station, ValveTable};

/// Tools a map can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    /// Bomb order picker with voice input
    Bomb,
    /// Valve pressure tracker
    Valve,
    /// Placeholder for maps without tools yet
    ComingSoon,
}

impl ToolKind {
    /// Tab label shown in the tool selector.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bomb => "Bomb",
            Self::Valve => "Valve",
            Self::ComingSoon => "Coming Soon",
        }
    }

    /// Identifier used in the catalog and on the command line.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Bomb => "bomb",
            Self::Valve => "valve",
            Self::ComingSoon => "coming-soon",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the tools need to know about one map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EasterEggMap {
    /// Identifier in kebab-case (e.g., "gorod-krovi")
    pub id: String,
    /// Display name (e.g., "Gorod Krovi")
    pub name: String,
    /// Tools in display order
    pub tools: Vec<ToolKind>,
    /// Stations in canonical order
    pub stations: Vec<Station>,
    /// Voice keywords
    pub keywords: KeywordMap,
    /// Valve pressure table
    pub valves: ValveTable,
    /// Progress checklist
    pub checklist: Vec<ChecklistItem>,
}

impl EasterEggMap {
    /// Whether the map offers a tool.
    #[must_use]
    pub fn has_tool(&self, tool: ToolKind) -> bool {
        self.tools.contains(&tool)
    }

    /// Returns the first tool, used when the map is selected.
    #[must_use]
    pub fn first_tool(&self) -> Option<ToolKind> {
        self.tools.first().copied()
    }

    /// Resolves a free-form station argument.
    ///
    /// Accepts the station's display name (case-insensitive) or any voice
    /// keyword for it.
    #[must_use]
    pub fn find_station(&self, name: &str) -> Option<&Station> {
        let trimmed = name.trim();
        self.stations
            .iter()
            .find(|s| s.matches_name(trimmed))
            .or_else(|| {
                let keyword = self.keywords.get(&trimmed.to_ascii_lowercase())?;
                self.stations.iter().find(|s| *s == keyword)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> EasterEggMap {
        let mut keywords = KeywordMap::new();
        keywords.insert("guns", Station::from("Armory")).unwrap();

        EasterEggMap {
            id: "sample".to_string(),
            name: "Sample".to_string(),
            tools: vec![ToolKind::Valve, ToolKind::Bomb],
            stations: vec![Station::from("Armory"), Station::from("Infirmary")],
            keywords,
            valves: ValveTable::new(),
            checklist: Vec::new(),
        }
    }

    #[test]
    fn test_find_station_by_name_or_keyword() {
        let map = sample_map();
        assert_eq!(map.find_station("armory"), Some(&Station::from("Armory")));
        assert_eq!(map.find_station("GUNS"), Some(&Station::from("Armory")));
        assert_eq!(map.find_station("nowhere"), None);
    }

    #[test]
    fn test_first_tool_and_has_tool() {
        let map = sample_map();
        assert_eq!(map.first_tool(), Some(ToolKind::Valve));
        assert!(map.has_tool(ToolKind::Bomb));
        assert!(!map.has_tool(ToolKind::ComingSoon));
    }

    #[test]
    fn test_tool_labels() {
        assert_eq!(ToolKind::ComingSoon.label(), "Coming Soon");
        assert_eq!(ToolKind::ComingSoon.id(), "coming-soon");
        assert_eq!(ToolKind::Bomb.to_string(), "Bomb");
    }
}
