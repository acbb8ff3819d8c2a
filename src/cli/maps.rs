//! Map listing command.

use crate::cli::common::{load_catalog, load_config, print_json, CliResult};
use clap::Args;
use serde::Serialize;

/// List the maps and the tools they offer
#[derive(Debug, Clone, Args)]
pub struct MapsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct MapSummary<'a> {
    id: &'a str,
    name: &'a str,
    tools: Vec<&'static str>,
    stations: Vec<&'a str>,
    keywords: usize,
    valve_entries: usize,
    checklist_items: usize,
}

impl MapsArgs {
    /// Execute the maps command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let catalog = load_catalog(&config)?;

        let summaries: Vec<MapSummary> = catalog
            .maps()
            .iter()
            .map(|map| MapSummary {
                id: &map.id,
                name: &map.name,
                tools: map.tools.iter().map(|t| t.id()).collect(),
                stations: map.stations.iter().map(|s| s.as_str()).collect(),
                keywords: map.keywords.len(),
                valve_entries: map.valves.len(),
                checklist_items: crate::models::checklist::count_items(&map.checklist),
            })
            .collect();

        if self.json {
            return print_json(&summaries);
        }

        for summary in &summaries {
            let marker = if summary.id == config.ui.default_map {
                "*"
            } else {
                " "
            };
            println!("{marker} {:<20} {}", summary.id, summary.name);
            println!("    Tools:    {}", summary.tools.join(", "));
            if !summary.stations.is_empty() {
                println!("    Stations: {}", summary.stations.join(", "));
            }
        }

        Ok(())
    }
}
