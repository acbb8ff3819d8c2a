//! Service layer for the interactive tools.
//!
//! Each service holds the runtime state of one tool. The static data it works
//! on comes from [`crate::models`].

pub mod checklist_state;
pub mod selection;
pub mod transcript;
pub mod valves;
pub mod viewport;

// Re-export commonly used types and functions
pub use checklist_state::{ChecklistRow, ChecklistState};
pub use selection::{OrderedSelection, SelectionEntry};
pub use transcript::{annotate_transcript, normalize_transcript, HeardWord};
pub use valves::{resolve, ValveAssignment, ValveReading, ValveSelection};
pub use viewport::LayoutMode;
