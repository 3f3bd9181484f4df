//! Descendant-role resolution
//!
//! A node's selectable scope is the set of roles beneath it. A role is its
//! own scope: selecting a supervisor does not select their reports.

use orgscope_tree::{CompositeId, FlatTree, TreeError};
use std::collections::{BTreeSet, HashSet};

/// Roles under `node`, in pre-order
///
/// - Unknown node: empty
/// - Role: just the role itself
/// - Anything else: every role at any depth below it, reporting roles included
///
/// # Errors
/// Returns [`TreeError::CyclicHierarchy`] if the walk reaches a node twice
pub fn descendant_role_ids(flat: &FlatTree, node: &CompositeId) -> Result<Vec<CompositeId>, TreeError> {
    let Some(start) = flat.get(node) else {
        return Ok(Vec::new());
    };
    if start.is_role() {
        return Ok(vec![*node]);
    }

    let mut roles = Vec::new();
    let mut visited = HashSet::from([*node]);
    // Reverse push keeps siblings in display order
    let mut stack: Vec<CompositeId> = flat.children_of(node).iter().rev().copied().collect();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            return Err(TreeError::CyclicHierarchy { at: current });
        }
        if current.is_role() {
            roles.push(current);
        }
        stack.extend(flat.children_of(&current).iter().rev().copied());
    }

    Ok(roles)
}

/// Same as [`descendant_role_ids`], as a set
///
/// # Errors
/// Returns [`TreeError::CyclicHierarchy`] if the walk reaches a node twice
pub fn descendant_role_set(flat: &FlatTree, node: &CompositeId) -> Result<BTreeSet<CompositeId>, TreeError> {
    Ok(descendant_role_ids(flat, node)?.into_iter().collect())
}
