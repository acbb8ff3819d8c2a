//! Voice keyword listing command ("What can I say?").

use crate::cli::common::{load_catalog, load_config, print_json, select_map, CliResult};
use clap::Args;

/// List the words recognized for each station
#[derive(Debug, Clone, Args)]
pub struct KeywordsArgs {
    /// Map id (defaults to the configured map)
    #[arg(short, long, value_name = "MAP")]
    pub map: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KeywordsArgs {
    /// Execute the keywords command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let catalog = load_catalog(&config)?;
        let map = select_map(&catalog, &config, self.map.as_deref())?;

        let groups = map.keywords.grouped();

        if self.json {
            return print_json(&groups);
        }

        if groups.is_empty() {
            println!("{} has no voice keywords.", map.name);
            return Ok(());
        }

        println!("What can I say? ({})", map.name);
        println!();
        for group in &groups {
            println!("  {:<18} {}", group.station, group.keywords.join(", "));
        }

        Ok(())
    }
}
