//! Tri-state selection roll-up
//!
//! Every node shows how much of its role scope is selected: all of it, some
//! of it, or none. Nodes with no roles beneath them are always
//! [`TriState::None`] and cannot be toggled.

use crate::resolve::descendant_role_ids;
use crate::selection::SelectionState;
use orgscope_tree::{CompositeId, FlatTree, TreeError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Aggregate selection status of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    /// Every role in scope is selected (and there is at least one)
    Full,
    /// Some but not all roles in scope are selected
    Partial,
    /// Nothing in scope is selected, or the scope is empty
    #[default]
    None,
}

impl TriState {
    /// Classify from selected and total role counts
    #[inline]
    #[must_use]
    pub const fn from_counts(selected: usize, total: usize) -> Self {
        if total == 0 || selected == 0 {
            TriState::None
        } else if selected >= total {
            TriState::Full
        } else {
            TriState::Partial
        }
    }
}

/// Tri-state of one node against a selection
///
/// Unknown nodes resolve to [`TriState::None`].
///
/// # Errors
/// Returns [`TreeError::CyclicHierarchy`] if the node's subtree loops
pub fn selection_state_for(
    flat: &FlatTree,
    node: &CompositeId,
    selected: &SelectionState,
) -> Result<TriState, TreeError> {
    let roles = descendant_role_ids(flat, node)?;
    let hits = roles.iter().filter(|role| selected.contains(role)).count();
    Ok(TriState::from_counts(hits, roles.len()))
}

/// Selected and total role counts for one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleCounts {
    /// Roles in scope that are selected
    pub selected: usize,
    /// Roles in scope
    pub total: usize,
}

impl RoleCounts {
    /// Tri-state for these counts
    #[inline]
    #[must_use]
    pub const fn state(self) -> TriState {
        TriState::from_counts(self.selected, self.total)
    }
}

/// Tri-state for every node of a table, computed in one pass
///
/// Rendering a badge per row with [`selection_state_for`] walks each subtree
/// once per ancestor; this view visits every node once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriStateView {
    counts: HashMap<CompositeId, RoleCounts>,
}

impl TriStateView {
    /// Compute the view
    ///
    /// # Errors
    /// Returns [`TreeError::CyclicHierarchy`] if any subtree loops
    pub fn compute(flat: &FlatTree, selected: &SelectionState) -> Result<Self, TreeError> {
        let mut pass = Rollup {
            flat,
            selected,
            subtree: HashMap::with_capacity(flat.len()),
            in_progress: HashSet::new(),
        };

        let mut counts = HashMap::with_capacity(flat.len());
        for node in flat {
            let id = node.composite_id;
            let scope = if id.is_role() {
                RoleCounts {
                    selected: usize::from(selected.contains(&id)),
                    total: 1,
                }
            } else {
                pass.subtree_counts(id)?
            };
            counts.insert(id, scope);
        }

        Ok(Self { counts })
    }

    /// Tri-state of a node; unknown nodes are [`TriState::None`]
    #[must_use]
    pub fn state(&self, id: &CompositeId) -> TriState {
        self.counts(id).state()
    }

    /// Role counts of a node; unknown nodes count zero
    #[must_use]
    pub fn counts(&self, id: &CompositeId) -> RoleCounts {
        self.counts.get(id).copied().unwrap_or_default()
    }

    /// True if toggling the node would change anything
    #[must_use]
    pub fn is_selectable(&self, id: &CompositeId) -> bool {
        self.counts(id).total > 0
    }

    /// Number of nodes in the view
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if the view is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Memoised post-order walk
struct Rollup<'a> {
    flat: &'a FlatTree,
    selected: &'a SelectionState,
    /// Every role in a node's subtree, the node itself included when it is a role
    subtree: HashMap<CompositeId, RoleCounts>,
    in_progress: HashSet<CompositeId>,
}

impl Rollup<'_> {
    /// Roles strictly below `id`
    fn subtree_counts(&mut self, id: CompositeId) -> Result<RoleCounts, TreeError> {
        let mut sum = RoleCounts::default();
        for child in self.flat.children_of(&id) {
            let child_counts = self.inclusive_counts(*child)?;
            sum.selected += child_counts.selected;
            sum.total += child_counts.total;
        }
        Ok(sum)
    }

    /// Roles at or below `id`
    fn inclusive_counts(&mut self, id: CompositeId) -> Result<RoleCounts, TreeError> {
        if let Some(done) = self.subtree.get(&id) {
            return Ok(*done);
        }
        if !self.in_progress.insert(id) {
            return Err(TreeError::CyclicHierarchy { at: id });
        }

        let mut counts = self.subtree_counts(id)?;
        if id.is_role() {
            counts.total += 1;
            counts.selected += usize::from(self.selected.contains(&id));
        }

        self.in_progress.remove(&id);
        self.subtree.insert(id, counts);
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_counts_rules() {
        assert_eq!(TriState::from_counts(0, 0), TriState::None);
        assert_eq!(TriState::from_counts(0, 3), TriState::None);
        assert_eq!(TriState::from_counts(1, 3), TriState::Partial);
        assert_eq!(TriState::from_counts(3, 3), TriState::Full);
    }

    #[test]
    fn tri_state_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TriState::Partial).unwrap(), "\"partial\"");
    }

    #[test]
    fn unknown_node_in_view_is_none() {
        let view = TriStateView::default();
        let id = CompositeId::role(1);
        assert_eq!(view.state(&id), TriState::None);
        assert!(!view.is_selectable(&id));
    }
}
