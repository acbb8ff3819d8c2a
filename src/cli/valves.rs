//! Valve lookup command.

use crate::cli::common::{
    load_catalog, load_config, print_json, select_map, select_station, CliError, CliResult,
};
use crate::models::{Station, ToolKind};
use crate::services::{resolve, ValveReading};
use clap::Args;
use serde::Serialize;

/// Show the valve values for a green light and a pink cylinder
#[derive(Debug, Clone, Args)]
pub struct ValvesArgs {
    /// Station with the green light (name or keyword)
    #[arg(short, long, value_name = "STATION")]
    pub start: String,

    /// Station with the pink cylinder (name or keyword)
    #[arg(short, long, value_name = "STATION")]
    pub end: String,

    /// Map id (defaults to the configured map)
    #[arg(short, long, value_name = "MAP")]
    pub map: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ValvesResult {
    start: Station,
    end: Station,
    /// Ascending by value, unassigned stations last
    readings: Vec<ValveReading>,
}

impl ValvesArgs {
    /// Execute the valves command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let catalog = load_catalog(&config)?;
        let map = select_map(&catalog, &config, self.map.as_deref())?;

        if !map.has_tool(ToolKind::Valve) {
            return Err(CliError::validation(format!(
                "{} has no valve tool",
                map.name
            )));
        }

        let start = select_station(map, &self.start)?;
        let end = select_station(map, &self.end)?;
        if start == end {
            return Err(CliError::validation(
                "Green light and pink cylinder must be different stations",
            ));
        }

        let assignment = resolve(&map.valves, &map.stations, start.as_str(), end.as_str());
        let result = ValvesResult {
            start: start.clone(),
            end: end.clone(),
            readings: assignment.sorted(),
        };

        if self.json {
            return print_json(&result);
        }

        println!("Green light:   {}", result.start);
        println!("Pink cylinder: {}", result.end);
        println!();
        for reading in &result.readings {
            println!("  {:<18} {:>2}", reading.station, reading.display_value());
        }

        Ok(())
    }
}
