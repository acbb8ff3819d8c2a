//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{APP_CONFIG_DIR_NAME, CONFIG_DIR_ENV};

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl ThemeMode {
    /// Parses a theme name as accepted on the command line.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Lowercase name used in output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// External catalog file replacing the embedded map data
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

/// Speech recognition settings.
///
/// Voice input is delegated to an external command that listens for one
/// utterance and prints the transcript on stdout. When no command is set,
/// voice input is disabled and only manual selection remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Program and arguments; `{lang}` in an argument is replaced by `language`
    #[serde(default)]
    pub command: Vec<String>,
    /// Recognition language tag
    #[serde(default = "default_speech_language")]
    pub language: String,
}

/// Default recognition language
fn default_speech_language() -> String {
    "en-GB".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            language: default_speech_language(),
        }
    }
}

impl SpeechConfig {
    /// Whether a recognizer command has been configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.command.is_empty()
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Offer the checklist panel
    #[serde(default = "default_show_checklist")]
    pub show_checklist: bool,
    /// Map shown on startup
    #[serde(default = "default_map")]
    pub default_map: String,
    /// Terminal width (columns) from which all tools are shown side by side
    #[serde(default = "default_wide_layout_min_width")]
    pub wide_layout_min_width: u16,
}

/// Checklist is offered by default
fn default_show_checklist() -> bool {
    true
}

/// Startup map
fn default_map() -> String {
    "gorod-krovi".to_string()
}

/// Minimum width for the side-by-side layout
fn default_wide_layout_min_width() -> u16 {
    120
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            show_checklist: default_show_checklist(),
            default_map: default_map(),
            wide_layout_min_width: default_wide_layout_min_width(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/egghelper/config.toml`
/// - macOS: `~/Library/Application Support/egghelper/config.toml`
/// - Windows: `%APPDATA%\egghelper\config.toml`
///
/// The directory can be overridden with the `EGGHELPER_CONFIG_DIR`
/// environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Voice input settings
    #[serde(default)]
    pub speech: SpeechConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// Uses `EGGHELPER_CONFIG_DIR` when set, otherwise the platform config
    /// directory joined with `egghelper`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Gets the path of the log file written while the TUI is running.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("egghelper.log"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - catalog path exists (if set)
    /// - speech command has a non-empty program name (if set)
    /// - speech language is not empty
    /// - default map id is not empty
    pub fn validate(&self) -> Result<()> {
        if let Some(catalog) = &self.paths.catalog {
            if !catalog.is_file() {
                anyhow::bail!("Catalog file does not exist: {}", catalog.display());
            }
        }

        if let Some(program) = self.speech.command.first() {
            if program.trim().is_empty() {
                anyhow::bail!("Speech command program cannot be empty");
            }
        }

        if self.speech.language.trim().is_empty() {
            anyhow::bail!("Speech language cannot be empty");
        }

        if self.ui.default_map.trim().is_empty() {
            anyhow::bail!("Default map cannot be empty");
        }

        if self.ui.wide_layout_min_width == 0 {
            anyhow::bail!("Wide layout width must be greater than zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert!(config.paths.catalog.is_none());
        assert!(!config.speech.is_configured());
        assert_eq!(config.speech.language, "en-GB");
        assert!(config.ui.show_checklist);
        assert_eq!(config.ui.default_map, "gorod-krovi");
        assert_eq!(config.ui.wide_layout_min_width, 120);
    }

    #[test]
    fn test_config_validate() {
        let config = Config::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_catalog_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new();

        config.paths.catalog = Some(temp_dir.path().join("missing.toml"));
        assert!(config.validate().is_err());

        let catalog = temp_dir.path().join("catalog.toml");
        fs::write(&catalog, "maps = []\n").unwrap();
        config.paths.catalog = Some(catalog);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_speech() {
        let mut config = Config::new();
        config.speech.command = vec![String::new()];
        assert!(config.validate().is_err());

        config.speech.command = vec!["whisper-listen".to_string()];
        assert!(config.validate().is_ok());

        config.speech.language = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [speech]
            command = ["listen", "--lang", "{lang}"]
            "#,
        )
        .unwrap();

        assert_eq!(config.speech.command.len(), 3);
        assert_eq!(config.speech.language, "en-GB");
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_config_toml_round_trip() {
        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Light;
        config.speech.command = vec!["listen".to_string()];

        let content = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&content).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_theme_mode_parse() {
        assert_eq!(ThemeMode::parse("Dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("auto"), Some(ThemeMode::Auto));
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(ThemeMode::Light.name(), "light");
    }
}
