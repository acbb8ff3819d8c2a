//! Shared CLI plumbing: error type, exit codes and loaders.

use serde::Serialize;
use std::fmt;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::models::{EasterEggMap, Station};

/// Process exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or unknown map/station
    ValidationError = 1,
    /// File system or serialization failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to the OS.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code for the process
    pub exit_code: ExitCode,
    /// Message printed on stderr
    pub message: String,
}

impl CliError {
    /// Invalid input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the configuration.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
}

/// Loads the configured catalog.
pub fn load_catalog(config: &Config) -> CliResult<Catalog> {
    Catalog::load_configured(config)
        .map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))
}

/// Picks a map by id, or the configured default map.
pub fn select_map<'a>(
    catalog: &'a Catalog,
    config: &Config,
    id: Option<&str>,
) -> CliResult<&'a EasterEggMap> {
    let id = id.unwrap_or(&config.ui.default_map);
    catalog.get(id).ok_or_else(|| {
        let known: Vec<&str> = catalog.maps().iter().map(|m| m.id.as_str()).collect();
        CliError::validation(format!(
            "Unknown map '{id}'. Available maps: {}",
            known.join(", ")
        ))
    })
}

/// Resolves a station argument by name or keyword.
pub fn select_station<'a>(map: &'a EasterEggMap, name: &str) -> CliResult<&'a Station> {
    map.find_station(name).ok_or_else(|| {
        CliError::validation(format!(
            "Unknown station '{name}' on {}. Stations: {}",
            map.name,
            map.stations
                .iter()
                .map(Station::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("x").exit_code.code(), 1);
        assert_eq!(CliError::io("x").exit_code.code(), 2);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_select_map_and_station() {
        let config = Config::default();
        let catalog = Catalog::load().unwrap();

        let map = select_map(&catalog, &config, None).unwrap();
        assert_eq!(map.id, "gorod-krovi");
        assert!(select_map(&catalog, &config, Some("nowhere")).is_err());

        assert_eq!(select_station(map, "beds").unwrap().as_str(), "Infirmary");
        assert_eq!(select_station(map, "armory").unwrap().as_str(), "Armory");
        let err = select_station(map, "moon").unwrap_err();
        assert_eq!(err.exit_code, ExitCode::ValidationError);
    }
}
