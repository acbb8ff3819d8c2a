//! Data models for maps, stations, keywords, checklists and valve tables.

pub mod checklist;
pub mod easter_egg;
pub mod keywords;
pub mod station;
pub mod valve_table;

pub use checklist::ChecklistItem;
pub use easter_egg::{EasterEggMap, ToolKind};
pub use keywords::{KeywordGroup, KeywordMap, HIGHLIGHT_PALETTE_SIZE};
pub use station::Station;
pub use valve_table::ValveTable;
