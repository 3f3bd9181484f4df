//! Search and expansion filtering
//!
//! A row is shown when the search text matches it, or, with no search text,
//! when every ancestor is expanded. Searching flattens the view: expansion
//! state is ignored while a query is active.

use orgscope_tree::{CompositeId, FlatNode, FlatTree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Normalised search text (trimmed, lower-cased)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Normalise raw input
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// True when no filtering applies
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Normalised text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive match on name, breadcrumb or type
    ///
    /// An empty query matches nothing; callers check [`Self::is_empty`] first.
    #[must_use]
    pub fn matches(&self, node: &FlatNode) -> bool {
        if self.is_empty() {
            return false;
        }
        node.name.to_lowercase().contains(&self.0)
            || node.display_path.to_lowercase().contains(&self.0)
            || node.kind.as_str().contains(&self.0)
    }
}

impl From<&str> for SearchQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Expanded node ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionSet(BTreeSet<CompositeId>);

impl ExpansionSet {
    /// Nothing expanded
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the root expanded, so its direct children show
    #[must_use]
    pub fn root_only(flat: &FlatTree) -> Self {
        flat.root().map(|root| root.composite_id).into_iter().collect()
    }

    /// True if the node is expanded
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &CompositeId) -> bool {
        self.0.contains(id)
    }

    /// Expand a node
    pub fn expand(&mut self, id: CompositeId) -> bool {
        self.0.insert(id)
    }

    /// Collapse a node; descendants keep their own state
    pub fn collapse(&mut self, id: &CompositeId) -> bool {
        self.0.remove(id)
    }

    /// Flip a node; returns the new expanded state
    pub fn toggle(&mut self, id: CompositeId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Expand every node that has children
    pub fn expand_all(&mut self, flat: &FlatTree) {
        self.0
            .extend(flat.iter().filter(|node| node.has_children).map(|node| node.composite_id));
    }

    /// Collapse everything
    pub fn collapse_all(&mut self) {
        self.0.clear();
    }

    /// Expand every ancestor of `id` so that it becomes visible
    ///
    /// Ancestors are left untouched if the parent chain loops.
    pub fn expand_to(&mut self, flat: &FlatTree, id: &CompositeId) {
        match flat.ancestors_of(id) {
            Ok(ancestors) => self.0.extend(ancestors),
            Err(err) => tracing::warn!(%id, error = %err, "cannot reveal node"),
        }
    }

    /// Number of expanded nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing is expanded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CompositeId> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = CompositeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Whether a row is shown
///
/// - Root: always
/// - Active query: the node itself matches
/// - No query: every ancestor is expanded
///
/// A node whose parent chain loops, or ends at a parent key missing from
/// the table, is hidden.
#[must_use]
pub fn is_visible(flat: &FlatTree, node: &FlatNode, expanded: &ExpansionSet, query: &SearchQuery) -> bool {
    if node.is_root() {
        return true;
    }
    if !query.is_empty() {
        return query.matches(node);
    }

    let ancestors = match flat.ancestors_of(&node.composite_id) {
        Ok(ancestors) => ancestors,
        Err(err) => {
            tracing::warn!(id = %node.composite_id, error = %err, "hiding node with cyclic ancestry");
            return false;
        }
    };

    // The topmost ancestor found must itself be parentless
    let dangling = match ancestors.last() {
        Some(top) => flat.get(top).and_then(|n| n.parent),
        None => node.parent,
    };
    if let Some(missing) = dangling {
        tracing::debug!(id = %node.composite_id, %missing, "hiding node with missing ancestor");
        return false;
    }

    ancestors.iter().all(|ancestor| expanded.contains(ancestor))
}

/// Rows to render, in display order
#[must_use]
pub fn visible_nodes<'a>(flat: &'a FlatTree, expanded: &ExpansionSet, query: &SearchQuery) -> Vec<&'a FlatNode> {
    flat.iter()
        .filter(|node| is_visible(flat, node, expanded, query))
        .collect()
}
