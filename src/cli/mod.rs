//! CLI command handlers.
//!
//! This module provides headless, scriptable access to the tools for
//! automation and testing.

pub mod checklist;
pub mod common;
pub mod config;
pub mod keywords;
pub mod maps;
pub mod normalize;
pub mod valves;

// Re-export types used by main.rs and tests
pub use checklist::ChecklistArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use keywords::KeywordsArgs;
pub use maps::MapsArgs;
pub use normalize::NormalizeArgs;
pub use valves::ValvesArgs;
