//! Zombies Easter egg helper - terminal companion for Gorod Krovi
//!
//! Without a subcommand the interactive TUI is started. Subcommands give
//! headless, scriptable access to the same tools.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use egghelper::catalog::Catalog;
use egghelper::cli::{
    ChecklistArgs, CliResult, ConfigArgs, KeywordsArgs, MapsArgs, NormalizeArgs, ValvesArgs,
};
use egghelper::config::Config;
use egghelper::constants::APP_NAME;
use egghelper::speech::{self, Recognizer};
use egghelper::tui;

/// Zombies Easter egg helper - bomb order, valves and checklist
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Map to open in the TUI (defaults to the configured map)
    #[arg(short, long, value_name = "MAP")]
    map: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available maps
    Maps(MapsArgs),
    /// Show the spoken keywords of a map
    Keywords(KeywordsArgs),
    /// Turn a transcript into an ordered list of stations
    Normalize(NormalizeArgs),
    /// Look up valve readings for a green light and pink cylinder pair
    Valves(ValvesArgs),
    /// Apply checklist operations and print the result
    Checklist(ChecklistArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Maps(args) => args.execute(),
            Self::Keywords(args) => args.execute(),
            Self::Normalize(args) => args.execute(),
            Self::Valves(args) => args.execute(),
            Self::Checklist(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn default_filter(verbose: bool, quiet: &'static str) -> EnvFilter {
    let level = if verbose { "debug" } else { quiet };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into())
}

/// CLI commands log to stderr so stdout stays machine readable.
fn init_cli_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, "warn"))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// The TUI owns the terminal, so logs go to a file in the config directory.
fn init_tui_logging(verbose: bool) -> Result<()> {
    let path = Config::log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context(format!(
            "Failed to create config directory: {}",
            parent.display()
        ))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context(format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::registry()
        .with(default_filter(verbose, "info"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run_interactive(cli: &Cli) -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {e:#}");
        Config::default()
    });
    let catalog = Catalog::load_configured(&config)?;

    let recognizer = speech::detect(&config.speech).map(|r| Box::new(r) as Box<dyn Recognizer>);
    info!(
        "Starting {} v{} (voice input {})",
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        if recognizer.is_some() { "on" } else { "off" }
    );

    let mut app_state = tui::AppState::new(catalog, config, recognizer, cli.map.as_deref())?;

    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut app_state, &mut terminal);
    tui::restore_terminal(terminal)?;

    result
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = &cli.command {
        init_cli_logging(cli.verbose);
        if let Err(e) = command.execute() {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code.code());
        }
        return Ok(());
    }

    if let Err(e) = init_tui_logging(cli.verbose) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    run_interactive(&cli)
}
