//! Checklist replay command.
//!
//! The checklist keeps no state between runs; the operations given on the
//! command line are applied in order to a fresh checklist.

use crate::cli::common::{
    load_catalog, load_config, print_json, select_map, CliError, CliResult,
};
use crate::models::checklist::count_items;
use crate::services::{ChecklistRow, ChecklistState};
use clap::Args;
use serde::Serialize;
use std::str::FromStr;

/// One checklist operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistOp {
    /// Check an item and its subtree
    Check(String),
    /// Uncheck an item and its subtree
    Uncheck(String),
    /// Expand or collapse one item
    Fold(String),
    /// Expand or collapse every item with children
    FoldAll,
    /// Uncheck everything
    Clear,
}

impl FromStr for ChecklistOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("check", id)) if !id.is_empty() => Ok(Self::Check(id.to_string())),
            Some(("uncheck", id)) if !id.is_empty() => Ok(Self::Uncheck(id.to_string())),
            Some(("fold", id)) if !id.is_empty() => Ok(Self::Fold(id.to_string())),
            None if s == "fold-all" => Ok(Self::FoldAll),
            None if s == "clear" => Ok(Self::Clear),
            _ => Err(format!(
                "invalid operation '{s}' (expected check:ID, uncheck:ID, fold:ID, fold-all or clear)"
            )),
        }
    }
}

impl ChecklistOp {
    /// Item the operation targets, if any.
    #[must_use]
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Self::Check(id) | Self::Uncheck(id) | Self::Fold(id) => Some(id),
            Self::FoldAll | Self::Clear => None,
        }
    }
}

fn item_ids(forest: &[crate::models::ChecklistItem]) -> Vec<&str> {
    let mut ids = Vec::new();
    crate::models::checklist::visit_forest(forest, |item| ids.push(item.id.as_str()));
    ids
}

/// Replay checklist operations and print the result
#[derive(Debug, Clone, Args)]
pub struct ChecklistArgs {
    /// Map id (defaults to the configured map)
    #[arg(short, long, value_name = "MAP")]
    pub map: Option<String>,

    /// Operation to apply, repeatable (check:ID, uncheck:ID, fold:ID, fold-all, clear)
    #[arg(long = "op", value_name = "OP")]
    pub ops: Vec<ChecklistOp>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ChecklistResult {
    checked: usize,
    total: usize,
    expand_all_label: &'static str,
    rows: Vec<ChecklistRow>,
}

impl ChecklistArgs {
    /// Execute the checklist command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let catalog = load_catalog(&config)?;
        let map = select_map(&catalog, &config, self.map.as_deref())?;
        let forest = &map.checklist;

        if forest.is_empty() {
            return Err(CliError::validation(format!("{} has no checklist", map.name)));
        }

        let mut state = ChecklistState::new();
        for op in &self.ops {
            let applied = match op {
                ChecklistOp::Check(id) => state.set_checked(forest, id, true),
                ChecklistOp::Uncheck(id) => state.set_checked(forest, id, false),
                ChecklistOp::Fold(id) => state.toggle_expansion(forest, id),
                ChecklistOp::FoldAll => {
                    state.toggle_all_expansion(forest);
                    true
                }
                ChecklistOp::Clear => {
                    state.clear_all(forest);
                    true
                }
            };
            if !applied {
                return Err(CliError::validation(format!(
                    "Unknown checklist item '{}'. Items: {}",
                    op.item_id().unwrap_or_default(),
                    item_ids(forest).join(", ")
                )));
            }
        }

        let result = ChecklistResult {
            checked: state.checked_count(forest),
            total: count_items(forest),
            expand_all_label: state.expand_all_label(),
            rows: state.visible_rows(forest),
        };

        if self.json {
            return print_json(&result);
        }

        println!("{} checklist ({}/{} done)", map.name, result.checked, result.total);
        println!();
        for row in &result.rows {
            let fold = match (row.has_children, row.expanded) {
                (false, _) => ' ',
                (true, true) => '-',
                (true, false) => '+',
            };
            let check = if row.checked { 'x' } else { ' ' };
            println!(
                "{}{fold} [{check}] {} ({})",
                "  ".repeat(row.depth),
                row.label,
                row.id
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ops() {
        assert_eq!(
            "check:egg".parse::<ChecklistOp>(),
            Ok(ChecklistOp::Check("egg".to_string()))
        );
        assert_eq!(
            "uncheck:egg-fire".parse::<ChecklistOp>(),
            Ok(ChecklistOp::Uncheck("egg-fire".to_string()))
        );
        assert_eq!("fold-all".parse::<ChecklistOp>(), Ok(ChecklistOp::FoldAll));
        assert_eq!("clear".parse::<ChecklistOp>(), Ok(ChecklistOp::Clear));
        assert!("check:".parse::<ChecklistOp>().is_err());
        assert!("smash:egg".parse::<ChecklistOp>().is_err());
    }
}
