//! Static checklist tree.
//!
//! Items are immutable configuration: the forest owns its roots and every
//! item owns its children. Runtime state (checked / expanded) lives in
//! [`crate::services::checklist_state::ChecklistState`], keyed by item id.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A checklist step, possibly with nested sub-steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Identifier, unique across the whole forest (e.g., "egg-fire")
    pub id: String,
    /// Display label (e.g., "Fire Damage")
    pub label: String,
    /// Ordered sub-steps
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChecklistItem>,
}

impl ChecklistItem {
    /// Creates a leaf item.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper to attach children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<ChecklistItem>) -> Self {
        self.children = children;
        self
    }

    /// Whether this item has at least one child.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Visits this item and all of its descendants, depth first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a ChecklistItem)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }
}

/// Visits every item of a forest, depth first.
pub fn visit_forest<'a>(forest: &'a [ChecklistItem], mut f: impl FnMut(&'a ChecklistItem)) {
    for item in forest {
        item.visit(&mut f);
    }
}

/// Finds an item by id together with its direct parent (if any).
#[must_use]
pub fn find_with_parent<'a>(
    forest: &'a [ChecklistItem],
    id: &str,
) -> Option<(&'a ChecklistItem, Option<&'a ChecklistItem>)> {
    fn search<'a>(
        items: &'a [ChecklistItem],
        parent: Option<&'a ChecklistItem>,
        id: &str,
    ) -> Option<(&'a ChecklistItem, Option<&'a ChecklistItem>)> {
        for item in items {
            if item.id == id {
                return Some((item, parent));
            }
            if let Some(found) = search(&item.children, Some(item), id) {
                return Some(found);
            }
        }
        None
    }

    search(forest, None, id)
}

/// Counts every item in a forest.
#[must_use]
pub fn count_items(forest: &[ChecklistItem]) -> usize {
    let mut count = 0;
    visit_forest(forest, |_| count += 1);
    count
}

/// Validates a forest: ids must be non-empty and unique, labels non-empty.
pub fn validate_forest(forest: &[ChecklistItem]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut problem = None;

    visit_forest(forest, |item| {
        if problem.is_some() {
            return;
        }
        if item.id.trim().is_empty() {
            problem = Some(format!("Checklist item '{}' has an empty id", item.label));
        } else if item.label.trim().is_empty() {
            problem = Some(format!("Checklist item '{}' has an empty label", item.id));
        } else if !seen.insert(item.id.as_str()) {
            problem = Some(format!("Checklist id '{}' is used more than once", item.id));
        }
    });

    match problem {
        Some(message) => anyhow::bail!(message),
        None => Ok(()),
    }
}
