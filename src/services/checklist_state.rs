//! Runtime state of a checklist.
//!
//! The checklist tree itself is static; checked and expanded flags are kept
//! in side tables keyed by item id.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::checklist::{find_with_parent, visit_forest};
use crate::models::ChecklistItem;

/// A checklist row ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistRow {
    /// Item id
    pub id: String,
    /// Item label
    pub label: String,
    /// Nesting depth (roots are 0)
    pub depth: usize,
    /// Checked flag
    pub checked: bool,
    /// Whether the item has children
    pub has_children: bool,
    /// Whether the children are shown
    pub expanded: bool,
}

/// Checked and expanded flags for one checklist forest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistState {
    checked: HashMap<String, bool>,
    expanded: HashMap<String, bool>,
}

impl ChecklistState {
    /// Creates a state with nothing checked and everything expanded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an item is checked. Unknown ids read as unchecked.
    #[must_use]
    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.get(id).copied().unwrap_or(false)
    }

    /// Whether an item's children are shown. Unknown ids read as expanded.
    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.get(id).copied().unwrap_or(true)
    }

    /// Checks or unchecks an item and its whole subtree.
    ///
    /// The direct parent (if any) is then set to the AND of its children.
    /// Reconciliation stops there: grandparents keep their state.
    ///
    /// Returns `false` if the id is not in the forest.
    pub fn set_checked(&mut self, forest: &[ChecklistItem], id: &str, value: bool) -> bool {
        let Some((item, parent)) = find_with_parent(forest, id) else {
            return false;
        };

        item.visit(&mut |node| {
            self.checked.insert(node.id.clone(), value);
        });

        if let Some(parent) = parent {
            let all_checked = parent
                .children
                .iter()
                .all(|child| self.is_checked(&child.id));
            self.checked.insert(parent.id.clone(), all_checked);
        }

        true
    }

    /// Unchecks every item of the forest.
    pub fn clear_all(&mut self, forest: &[ChecklistItem]) {
        visit_forest(forest, |item| {
            self.checked.insert(item.id.clone(), false);
        });
    }

    /// Flips one item's expanded flag.
    ///
    /// Returns `false` if the id is not in the forest.
    pub fn toggle_expansion(&mut self, forest: &[ChecklistItem], id: &str) -> bool {
        if find_with_parent(forest, id).is_none() {
            return false;
        }
        let expanded = self.is_expanded(id);
        self.expanded.insert(id.to_string(), !expanded);
        true
    }

    /// Expands or collapses every item that has children.
    ///
    /// If any such item has no explicit `true` entry, all of them become
    /// expanded; otherwise all of them collapse.
    pub fn toggle_all_expansion(&mut self, forest: &[ChecklistItem]) {
        let mut parents = Vec::new();
        visit_forest(forest, |item| {
            if item.has_children() {
                parents.push(item.id.clone());
            }
        });

        let any_collapsed = parents
            .iter()
            .any(|id| !self.expanded.get(id).copied().unwrap_or(false));

        self.expanded = parents
            .into_iter()
            .map(|id| (id, any_collapsed))
            .collect();
    }

    /// Label of the expand/collapse-all control.
    #[must_use]
    pub fn expand_all_label(&self) -> &'static str {
        if self.expanded.values().any(|expanded| !expanded) {
            "Expand All"
        } else {
            "Collapse All"
        }
    }

    /// Number of checked items.
    #[must_use]
    pub fn checked_count(&self, forest: &[ChecklistItem]) -> usize {
        let mut count = 0;
        visit_forest(forest, |item| {
            if self.is_checked(&item.id) {
                count += 1;
            }
        });
        count
    }

    /// Rows to draw, skipping the subtrees of collapsed items.
    #[must_use]
    pub fn visible_rows(&self, forest: &[ChecklistItem]) -> Vec<ChecklistRow> {
        let mut rows = Vec::new();
        self.push_rows(forest, 0, &mut rows);
        rows
    }

    fn push_rows(&self, items: &[ChecklistItem], depth: usize, rows: &mut Vec<ChecklistRow>) {
        for item in items {
            let expanded = self.is_expanded(&item.id);
            rows.push(ChecklistRow {
                id: item.id.clone(),
                label: item.label.clone(),
                depth,
                checked: self.is_checked(&item.id),
                has_children: item.has_children(),
                expanded,
            });
            if expanded {
                self.push_rows(&item.children, depth + 1, rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn egg_forest() -> Vec<ChecklistItem> {
        vec![
            ChecklistItem::new("power", "Turn on the power"),
            ChecklistItem::new("egg", "Dragon Egg").with_children(vec![
                ChecklistItem::new("egg-get", "Get the egg"),
                ChecklistItem::new("egg-fire", "Fire damage"),
            ]),
        ]
    }

    fn deep_forest() -> Vec<ChecklistItem> {
        vec![ChecklistItem::new("root", "Root").with_children(vec![
            ChecklistItem::new("mid", "Mid").with_children(vec![
                ChecklistItem::new("leaf-a", "Leaf A"),
                ChecklistItem::new("leaf-b", "Leaf B"),
            ]),
            ChecklistItem::new("side", "Side"),
        ])]
    }

    #[test]
    fn test_children_reconcile_parent() {
        let forest = egg_forest();
        let mut state = ChecklistState::new();

        assert!(state.set_checked(&forest, "egg-get", true));
        assert!(!state.is_checked("egg"));
        assert!(state.set_checked(&forest, "egg-fire", true));
        assert!(state.is_checked("egg"));

        state.set_checked(&forest, "egg-fire", false);
        assert!(!state.is_checked("egg"));
        assert!(state.is_checked("egg-get"));
        assert!(!state.is_checked("power"));
    }

    #[test]
    fn test_check_parent_cascades_to_every_depth() {
        let forest = deep_forest();
        let mut state = ChecklistState::new();

        state.set_checked(&forest, "root", true);
        for id in ["root", "mid", "leaf-a", "leaf-b", "side"] {
            assert!(state.is_checked(id), "{id} should be checked");
        }

        state.set_checked(&forest, "mid", false);
        assert!(!state.is_checked("leaf-a"));
        assert!(!state.is_checked("leaf-b"));
        assert!(state.is_checked("side"));
        assert!(!state.is_checked("root"));
    }

    #[test]
    fn test_reconciliation_is_one_level_only() {
        let forest = deep_forest();
        let mut state = ChecklistState::new();

        state.set_checked(&forest, "root", true);
        state.set_checked(&forest, "leaf-a", false);

        assert!(!state.is_checked("mid"));
        // grandparent keeps its previous state
        assert!(state.is_checked("root"));

        state.set_checked(&forest, "leaf-a", true);
        assert!(state.is_checked("mid"));
        assert!(state.is_checked("root"));
    }

    #[test]
    fn test_clear_all() {
        let forest = deep_forest();
        let mut state = ChecklistState::new();
        state.set_checked(&forest, "root", true);

        state.clear_all(&forest);
        assert_eq!(state.checked_count(&forest), 0);
        assert!(!state.is_checked("leaf-b"));
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let forest = egg_forest();
        let mut state = ChecklistState::new();
        assert!(!state.set_checked(&forest, "missing", true));
        assert!(!state.toggle_expansion(&forest, "missing"));
        assert_eq!(state, ChecklistState::new());
    }

    #[test]
    fn test_toggle_expansion_affects_only_item() {
        let forest = deep_forest();
        let mut state = ChecklistState::new();

        assert!(state.is_expanded("root"));
        state.toggle_expansion(&forest, "root");
        assert!(!state.is_expanded("root"));
        assert!(state.is_expanded("mid"));

        let rows = state.visible_rows(&forest);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "root");
    }

    #[test]
    fn test_toggle_all_expansion() {
        let forest = deep_forest();
        let mut state = ChecklistState::new();
        assert_eq!(state.expand_all_label(), "Collapse All");

        // absent entries count as collapsed, so the first flip expands
        state.toggle_all_expansion(&forest);
        assert!(state.is_expanded("root"));
        assert!(state.is_expanded("mid"));
        assert_eq!(state.expand_all_label(), "Collapse All");

        state.toggle_all_expansion(&forest);
        assert!(!state.is_expanded("root"));
        assert!(!state.is_expanded("mid"));
        assert_eq!(state.expand_all_label(), "Expand All");

        state.toggle_expansion(&forest, "mid");
        state.toggle_all_expansion(&forest);
        assert!(state.is_expanded("root"));
        assert!(state.is_expanded("mid"));
    }

    #[test]
    fn test_visible_rows_depth() {
        let forest = deep_forest();
        let mut state = ChecklistState::new();
        state.set_checked(&forest, "leaf-b", true);

        let rows = state.visible_rows(&forest);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "mid", "leaf-a", "leaf-b", "side"]);
        assert_eq!(rows[2].depth, 2);
        assert!(rows[3].checked);
        assert!(rows[1].has_children);

        state.toggle_expansion(&forest, "mid");
        assert_eq!(state.visible_rows(&forest).len(), 3);
    }
}
