//! Configuration management CLI commands.

use crate::cli::common::{load_catalog, load_config, print_json, CliError, CliResult};
use crate::catalog::Catalog;
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// External catalog file (empty string restores the built-in maps)
    #[arg(long, value_name = "FILE")]
    catalog: Option<String>,

    /// Speech command, split on whitespace (empty string disables voice input)
    #[arg(long, value_name = "COMMAND")]
    speech_command: Option<String>,

    /// Speech recognition language (e.g. en-GB)
    #[arg(long, value_name = "LANG")]
    language: Option<String>,

    /// Map shown on startup
    #[arg(long, value_name = "MAP")]
    default_map: Option<String>,

    /// Offer the checklist panel
    #[arg(long, value_name = "BOOL")]
    show_checklist: Option<bool>,

    /// Terminal width from which all tools are shown side by side
    #[arg(long, value_name = "COLUMNS")]
    wide_width: Option<u16>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    paths: PathsOutput,
    speech: SpeechOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog: Option<String>,
}

#[derive(Serialize, Debug)]
struct SpeechOutput {
    command: Vec<String>,
    language: String,
    configured: bool,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    show_checklist: bool,
    default_map: String,
    wide_layout_min_width: u16,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.theme.is_none()
            && self.catalog.is_none()
            && self.speech_command.is_none()
            && self.language.is_none()
            && self.default_map.is_none()
            && self.show_checklist.is_none()
            && self.wide_width.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        // At least one argument must be provided
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --theme, --catalog, \
                 --speech-command, --language, --default-map, --show-checklist, or --wide-width",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(theme_str) = &self.theme {
            config.ui.theme_mode = ThemeMode::parse(theme_str).ok_or_else(|| {
                CliError::validation("Invalid theme mode. Must be 'auto', 'light', or 'dark'")
            })?;
        }

        if let Some(path) = &self.catalog {
            if path.trim().is_empty() {
                config.paths.catalog = None;
            } else {
                let path = PathBuf::from(path.trim());
                Catalog::from_path(&path)
                    .map_err(|e| CliError::validation(format!("Invalid catalog: {e:#}")))?;
                config.paths.catalog = Some(path);
            }
        }

        if let Some(command) = &self.speech_command {
            config.speech.command = command.split_whitespace().map(str::to_string).collect();
        }

        if let Some(language) = &self.language {
            config.speech.language = language.trim().to_string();
        }

        if let Some(map) = &self.default_map {
            config.ui.default_map = map.trim().to_string();
        }

        if let Some(show) = self.show_checklist {
            config.ui.show_checklist = show;
        }

        if let Some(width) = self.wide_width {
            config.ui.wide_layout_min_width = width;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        if self.default_map.is_some() || self.catalog.is_some() {
            let catalog = load_catalog(&config)?;
            if catalog.get(&config.ui.default_map).is_none() {
                return Err(CliError::validation(format!(
                    "Unknown map '{}'",
                    config.ui.default_map
                )));
            }
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let config_file = Config::config_file_path()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();

    let output = ConfigOutput {
        config_file,
        paths: PathsOutput {
            catalog: config
                .paths
                .catalog
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
        speech: SpeechOutput {
            command: config.speech.command.clone(),
            language: config.speech.language.clone(),
            configured: config.speech.is_configured(),
        },
        ui: UiOutput {
            theme: config.ui.theme_mode.name().to_string(),
            show_checklist: config.ui.show_checklist,
            default_map: config.ui.default_map.clone(),
            wide_layout_min_width: config.ui.wide_layout_min_width,
        },
    };

    print_json(&output)
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Configuration");
    println!("=============");
    println!();

    println!("Paths:");
    match &config.paths.catalog {
        Some(path) => println!("  Catalog: {}", path.display()),
        None => println!("  Catalog: (built-in)"),
    }
    println!();

    println!("Speech:");
    if config.speech.is_configured() {
        println!("  Command:  {}", config.speech.command.join(" "));
    } else {
        println!("  Command:  (not configured, manual selection only)");
    }
    println!("  Language: {}", config.speech.language);
    println!();

    println!("UI:");
    println!("  Theme Mode:     {}", config.ui.theme_mode.name());
    println!("  Show Checklist: {}", config.ui.show_checklist);
    println!("  Default Map:    {}", config.ui.default_map);
    println!("  Wide Layout At: {} columns", config.ui.wide_layout_min_width);
    println!();
}
