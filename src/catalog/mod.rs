//! Embedded map catalog.
//!
//! The static data for every supported map (stations, voice keywords, valve
//! table, checklist) is embedded in the binary as TOML and validated when the
//! catalog is loaded. A user-supplied catalog file can replace it.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::config::Config;
use crate::models::checklist::validate_forest;
use crate::models::{ChecklistItem, EasterEggMap, KeywordMap, Station, ToolKind, ValveTable};

/// Embedded map definitions, in display order.
const EMBEDDED_MAPS: [(&str, &str); 2] = [
    ("gorod_krovi.toml", include_str!("gorod_krovi.toml")),
    ("coming_soon.toml", include_str!("coming_soon.toml")),
];

/// Keyword schema. Entries are kept in file order, which fixes each
/// keyword's highlight slot.
#[derive(Debug, Deserialize)]
struct KeywordFile {
    word: String,
    station: String,
}

/// Valve entry schema.
#[derive(Debug, Deserialize)]
struct ValveEntryFile {
    start: String,
    end: String,
    #[serde(default)]
    values: BTreeMap<String, u8>,
}

/// Map schema, shared by the embedded files and external catalogs.
#[derive(Debug, Deserialize)]
struct MapFile {
    id: String,
    name: String,
    tools: Vec<ToolKind>,
    #[serde(default)]
    stations: Vec<String>,
    #[serde(default)]
    keywords: Vec<KeywordFile>,
    #[serde(default)]
    valves: Vec<ValveEntryFile>,
    #[serde(default)]
    checklist: Vec<ChecklistItem>,
}

/// External catalog schema: a list of maps.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    maps: Vec<MapFile>,
}

/// All maps known to the application.
#[derive(Debug, Clone)]
pub struct Catalog {
    maps: Vec<EasterEggMap>,
}

impl Catalog {
    /// Loads the embedded catalog.
    pub fn load() -> Result<Self> {
        let mut maps = Vec::with_capacity(EMBEDDED_MAPS.len());

        for (file_name, content) in EMBEDDED_MAPS {
            let raw: MapFile = toml::from_str(content)
                .with_context(|| format!("Failed to parse embedded {file_name}"))?;
            maps.push(
                build_map(raw).with_context(|| format!("Invalid embedded map {file_name}"))?,
            );
        }

        Self::from_maps(maps)
    }

    /// Loads a catalog from a TOML file containing a `[[maps]]` array.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load catalog file: {}", path.display()))
    }

    /// Parses a catalog from TOML text containing a `[[maps]]` array.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: CatalogFile = toml::from_str(content).context("Failed to parse catalog")?;
        let maps = raw
            .maps
            .into_iter()
            .map(|map| {
                let id = map.id.clone();
                build_map(map).with_context(|| format!("Invalid map '{id}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_maps(maps)
    }

    /// Loads the catalog selected by the configuration.
    pub fn load_configured(config: &Config) -> Result<Self> {
        match &config.paths.catalog {
            Some(path) => {
                debug!("Loading catalog from {}", path.display());
                Self::from_path(path)
            }
            None => Self::load(),
        }
    }

    /// Builds a catalog from already validated maps.
    pub fn from_maps(maps: Vec<EasterEggMap>) -> Result<Self> {
        if maps.is_empty() {
            anyhow::bail!("Catalog must define at least one map");
        }

        let mut ids = HashSet::new();
        for map in &maps {
            if !ids.insert(map.id.as_str()) {
                anyhow::bail!("Map id '{}' is defined more than once", map.id);
            }
        }

        Ok(Self { maps })
    }

    /// All maps in display order.
    #[must_use]
    pub fn maps(&self) -> &[EasterEggMap] {
        &self.maps
    }

    /// Gets a map by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EasterEggMap> {
        self.maps.iter().find(|m| m.id == id)
    }

    /// Index of a map by id.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.maps.iter().position(|m| m.id == id)
    }
}

/// Converts and validates one map definition.
fn build_map(raw: MapFile) -> Result<EasterEggMap> {
    validate_map_id(&raw.id)?;

    if raw.name.trim().is_empty() {
        anyhow::bail!("Map name cannot be empty");
    }

    if raw.tools.is_empty() {
        anyhow::bail!("Map must offer at least one tool");
    }

    let mut stations: Vec<Station> = Vec::with_capacity(raw.stations.len());
    for name in raw.stations {
        if name.trim().is_empty() {
            anyhow::bail!("Station names cannot be empty");
        }
        let station = Station::new(name);
        if stations.contains(&station) {
            anyhow::bail!("Station '{station}' is listed twice");
        }
        stations.push(station);
    }

    let needs_stations =
        raw.tools.contains(&ToolKind::Bomb) || raw.tools.contains(&ToolKind::Valve);
    if needs_stations && stations.len() < 2 {
        anyhow::bail!("Bomb and valve tools need at least two stations");
    }

    let known = |name: &str| -> Result<Station> {
        let station = Station::new(name);
        if stations.contains(&station) {
            Ok(station)
        } else {
            anyhow::bail!("Unknown station '{name}'")
        }
    };

    let mut keywords = KeywordMap::new();
    for entry in raw.keywords {
        keywords.insert(&entry.word, known(&entry.station)?)?;
    }

    let mut valves = ValveTable::new();
    for entry in raw.valves {
        let start = known(&entry.start)?;
        let end = known(&entry.end)?;
        let values = entry
            .values
            .into_iter()
            .map(|(name, value)| -> Result<(Station, u8)> { Ok((known(&name)?, value)) })
            .collect::<Result<BTreeMap<_, _>>>()?;
        valves.insert(start, end, values)?;
    }

    validate_forest(&raw.checklist)?;

    Ok(EasterEggMap {
        id: raw.id,
        name: raw.name,
        tools: raw.tools,
        stations,
        keywords,
        valves,
        checklist: raw.checklist,
    })
}

/// Map ids are kebab-case, like the ones used on the command line.
fn validate_map_id(id: &str) -> Result<()> {
    if id.is_empty() {
        anyhow::bail!("Map id cannot be empty");
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        || id.starts_with('-')
        || id.ends_with('-')
    {
        anyhow::bail!("Map id '{id}' must be kebab-case (lowercase, hyphens, and digits only)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_catalog() -> Catalog {
        Catalog::load().expect("Failed to load embedded catalog")
    }

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = get_test_catalog();
        let ids: Vec<&str> = catalog.maps().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["gorod-krovi", "more-coming-soon"]);
    }

    #[test]
    fn test_gorod_krovi_data() {
        let catalog = get_test_catalog();
        let map = catalog.get("gorod-krovi").unwrap();

        assert_eq!(map.name, "Gorod Krovi");
        assert_eq!(map.tools, vec![ToolKind::Bomb, ToolKind::Valve]);
        assert_eq!(map.stations.len(), 6);
        assert_eq!(map.keywords.get("beds"), Some(&Station::from("Infirmary")));
        assert_eq!(map.keywords.get("infirm"), Some(&Station::from("Infirmary")));
        // every ordered pair of distinct stations has an entry
        assert_eq!(map.valves.len(), 30);
        assert_eq!(map.checklist.len(), 2);
        assert_eq!(map.checklist[1].children.len(), 4);
    }

    #[test]
    fn test_gorod_krovi_highlight_slots_follow_keyword_order() {
        let catalog = get_test_catalog();
        let keywords = &catalog.get("gorod-krovi").unwrap().keywords;

        assert_eq!(keywords.len(), 20);
        let slots: Vec<_> = ["supply", "right", "beds", "guns", "top"]
            .iter()
            .map(|word| keywords.highlight_slot(word))
            .collect();
        assert_eq!(slots, vec![Some(0), Some(7), Some(8), Some(9), Some(4)]);
    }

    #[test]
    fn test_coming_soon_map_has_no_stations() {
        let catalog = get_test_catalog();
        let map = catalog.get("more-coming-soon").unwrap();
        assert_eq!(map.tools, vec![ToolKind::ComingSoon]);
        assert!(map.stations.is_empty());
        assert!(map.keywords.is_empty());
    }

    #[test]
    fn test_position() {
        let catalog = get_test_catalog();
        assert_eq!(catalog.position("more-coming-soon"), Some(1));
        assert_eq!(catalog.position("der-eisendrache"), None);
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_keyword_station() {
        let toml = r#"
            [[maps]]
            id = "test"
            name = "Test"
            tools = ["bomb"]
            stations = ["A", "B"]

            [[maps.keywords]]
            word = "cee"
            station = "C"
        "#;
        let err = Catalog::from_toml_str(toml).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown station 'C'"));
    }

    #[test]
    fn test_from_toml_str_rejects_duplicate_checklist_ids() {
        let toml = r#"
            [[maps]]
            id = "test"
            name = "Test"
            tools = ["coming-soon"]

            [[maps.checklist]]
            id = "step"
            label = "Step"

            [[maps.checklist.children]]
            id = "step"
            label = "Step again"
        "#;
        assert!(Catalog::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_from_toml_str_rejects_duplicate_map_ids() {
        let toml = r#"
            [[maps]]
            id = "test"
            name = "Test"
            tools = ["coming-soon"]

            [[maps]]
            id = "test"
            name = "Test Again"
            tools = ["coming-soon"]
        "#;
        assert!(Catalog::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_validate_map_id() {
        assert!(validate_map_id("gorod-krovi").is_ok());
        assert!(validate_map_id("Gorod Krovi").is_err());
        assert!(validate_map_id("-krovi").is_err());
        assert!(validate_map_id("").is_err());
    }
}
