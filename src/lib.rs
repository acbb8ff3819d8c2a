//! Zombies Easter egg helper library
//!
//! Core of the `egghelper` tools: the station catalog, transcript
//! normalization, the ordered bomb selection, the valve resolver and the
//! checklist state machine, plus the TUI, CLI and optional web front ends
//! built on top of them.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
pub mod shortcuts;
pub mod speech;
pub mod tui;

#[cfg(feature = "web")]
pub mod web;
