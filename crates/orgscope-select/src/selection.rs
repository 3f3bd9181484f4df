//! Selection state and cascade operations
//!
//! The selection is a set of role composite ids and nothing else: tri-state
//! badges are derived from it, and numeric role ids are only produced by an
//! explicit [`SelectionEngine::resolve_numeric`] step at the API boundary.

use crate::resolve::descendant_role_ids;
use crate::tristate::{selection_state_for, TriState, TriStateView};
use orgscope_tree::{CompositeId, FlatTree, TreeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of selected role ids
///
/// Serialises as a list of composite ids; decoding rejects any id that is not
/// a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeSet<CompositeId>", into = "BTreeSet<CompositeId>")]
pub struct SelectionState(BTreeSet<CompositeId>);

/// A decoded selection named a node that is not a role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("selection may only hold roles, found {id}")]
pub struct NotARole {
    /// Offending id
    pub id: CompositeId,
}

impl SelectionState {
    /// Empty selection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the role is selected
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &CompositeId) -> bool {
        self.0.contains(id)
    }

    /// Number of selected roles
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing is selected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected ids in sorted order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &CompositeId> {
        self.0.iter()
    }

    /// Underlying set
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &BTreeSet<CompositeId> {
        &self.0
    }
}

impl FromIterator<CompositeId> for SelectionState {
    fn from_iter<I: IntoIterator<Item = CompositeId>>(iter: I) -> Self {
        Self(iter.into_iter().filter(CompositeId::is_role).collect())
    }
}

impl TryFrom<BTreeSet<CompositeId>> for SelectionState {
    type Error = NotARole;

    fn try_from(ids: BTreeSet<CompositeId>) -> Result<Self, Self::Error> {
        match ids.iter().find(|id| !id.is_role()) {
            Some(id) => Err(NotARole { id: *id }),
            None => Ok(Self(ids)),
        }
    }
}

impl From<SelectionState> for BTreeSet<CompositeId> {
    fn from(selection: SelectionState) -> Self {
        selection.0
    }
}

impl<'a> IntoIterator for &'a SelectionState {
    type Item = &'a CompositeId;
    type IntoIter = std::collections::btree_set::Iter<'a, CompositeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Cascade select or deselect below `node`
///
/// - Scope fully selected: every role in scope is removed
/// - Otherwise: every role in scope is added
/// - Empty scope or unknown node: the input is returned unchanged
///
/// # Errors
/// Returns [`TreeError::CyclicHierarchy`] if the node's subtree loops
pub fn toggle(
    flat: &FlatTree,
    node: &CompositeId,
    selected: &SelectionState,
) -> Result<SelectionState, TreeError> {
    let roles = descendant_role_ids(flat, node)?;
    if roles.is_empty() {
        tracing::trace!(%node, "toggle on node without roles ignored");
        return Ok(selected.clone());
    }

    let hits = roles.iter().filter(|role| selected.contains(role)).count();
    let mut next = selected.0.clone();
    match TriState::from_counts(hits, roles.len()) {
        TriState::Full => {
            for role in &roles {
                next.remove(role);
            }
        }
        TriState::Partial | TriState::None => next.extend(roles),
    }

    Ok(SelectionState(next))
}

/// The empty selection
#[inline]
#[must_use]
pub fn clear() -> SelectionState {
    SelectionState::new()
}

/// Owner of one session's selection
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    selected: SelectionState,
}

impl SelectionEngine {
    /// Engine with nothing selected
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine starting from an existing selection
    #[inline]
    #[must_use]
    pub fn with_selection(selected: SelectionState) -> Self {
        Self { selected }
    }

    /// Current selection
    #[inline]
    #[must_use]
    pub fn selected(&self) -> &SelectionState {
        &self.selected
    }

    /// Cascade toggle; returns true if the selection changed
    ///
    /// # Errors
    /// Returns [`TreeError::CyclicHierarchy`] if the node's subtree loops
    pub fn toggle(&mut self, flat: &FlatTree, node: &CompositeId) -> Result<bool, TreeError> {
        let next = toggle(flat, node, &self.selected)?;
        let changed = next != self.selected;
        if changed {
            tracing::debug!(%node, before = self.selected.len(), after = next.len(), "selection toggled");
            self.selected = next;
        }
        Ok(changed)
    }

    /// Empty the selection; returns true if anything was selected
    pub fn clear(&mut self) -> bool {
        let had_any = !self.selected.is_empty();
        self.selected = clear();
        had_any
    }

    /// Tri-state of one node
    ///
    /// # Errors
    /// Returns [`TreeError::CyclicHierarchy`] if the node's subtree loops
    pub fn state_for(&self, flat: &FlatTree, node: &CompositeId) -> Result<TriState, TreeError> {
        selection_state_for(flat, node, &self.selected)
    }

    /// Tri-state of every node
    ///
    /// # Errors
    /// Returns [`TreeError::CyclicHierarchy`] if any subtree loops
    pub fn view(&self, flat: &FlatTree) -> Result<TriStateView, TreeError> {
        TriStateView::compute(flat, &self.selected)
    }

    /// Numeric role ids for submission, ascending
    ///
    /// Ids no longer present in `flat`, or present as a non-role node, are
    /// skipped.
    #[must_use]
    pub fn resolve_numeric(&self, flat: &FlatTree) -> Vec<i64> {
        self.selected
            .iter()
            .filter_map(|id| {
                let numeric = flat.get(id).filter(|node| node.is_role()).map(|node| node.numeric_id);
                if numeric.is_none() {
                    tracing::warn!(%id, "selected role missing from hierarchy, skipped");
                }
                numeric
            })
            .collect()
    }

    /// Drop selected ids that `flat` does not contain; returns how many were dropped
    pub fn retain_known(&mut self, flat: &FlatTree) -> usize {
        let before = self.selected.len();
        self.selected.0.retain(|id| flat.contains(id));
        before - self.selected.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgscope_tree::NodeKind;

    #[test]
    fn from_iter_keeps_only_roles() {
        let selection: SelectionState = [CompositeId::role(1), CompositeId::new(NodeKind::Site, 1)]
            .into_iter()
            .collect();
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(&CompositeId::role(1)));
    }

    #[test]
    fn clear_is_empty() {
        assert!(clear().is_empty());
    }

    #[test]
    fn engine_clear_reports_change() {
        let mut engine = SelectionEngine::with_selection([CompositeId::role(3)].into_iter().collect());
        assert!(engine.clear());
        assert!(!engine.clear());
    }

    #[test]
    fn decode_rejects_non_role_ids() {
        let result = serde_json::from_str::<SelectionState>(r#"["site-1","role-10"]"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("site-1"), "unexpected error: {err}");

        let selection: SelectionState = serde_json::from_str(r#"["role-11","role-10"]"#).unwrap();
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn selection_serializes_as_string_list() {
        let selection: SelectionState = [CompositeId::role(11), CompositeId::role(10)].into_iter().collect();
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"["role-10","role-11"]"#);
    }
}
