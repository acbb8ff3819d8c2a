//! Transcript normalization command.

use crate::cli::common::{load_catalog, load_config, print_json, select_map, CliResult};
use crate::models::Station;
use crate::services::{annotate_transcript, normalize_transcript, HeardWord};
use clap::Args;
use serde::Serialize;

/// Turn a spoken transcript into a station order
#[derive(Debug, Clone, Args)]
pub struct NormalizeArgs {
    /// Transcript text (e.g. "supply, infirmary dragon")
    #[arg(value_name = "TRANSCRIPT")]
    pub transcript: String,

    /// Map id (defaults to the configured map)
    #[arg(short, long, value_name = "MAP")]
    pub map: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct NormalizeResult {
    transcript: String,
    stations: Vec<Station>,
    heard: Vec<HeardWord>,
}

impl NormalizeArgs {
    /// Execute the normalize command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let catalog = load_catalog(&config)?;
        let map = select_map(&catalog, &config, self.map.as_deref())?;

        let result = NormalizeResult {
            transcript: self.transcript.clone(),
            stations: normalize_transcript(&self.transcript, &map.keywords),
            heard: annotate_transcript(&self.transcript, &map.keywords),
        };

        if self.json {
            return print_json(&result);
        }

        if result.stations.is_empty() {
            println!("No stations recognized.");
            return Ok(());
        }

        for (i, station) in result.stations.iter().enumerate() {
            println!("{}. {station}", i + 1);
        }

        Ok(())
    }
}
