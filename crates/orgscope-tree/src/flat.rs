//! Flattened hierarchy table
//!
//! [`FlatTree`] is an arena keyed by [`CompositeId`]: nodes refer to their
//! parent by key, never by ownership, and iteration follows the pre-order in
//! which the flattener appended them.

use crate::composite::CompositeId;
use crate::error::TreeError;
use crate::kind::NodeKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One addressable node of a flattened tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatNode {
    /// Unique key across all levels
    pub composite_id: CompositeId,

    /// Backend id, kept for API calls
    pub numeric_id: i64,

    /// Display name (possibly the `"<type> <id>"` placeholder)
    pub name: String,

    /// Level
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Distance from the root (root = 0)
    pub depth: usize,

    /// Ancestor names joined with the separator, ending in `name`
    pub display_path: String,

    /// Parent key (lookup only)
    #[serde(rename = "parentCompositeId", default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<CompositeId>,

    /// True if this node's own child collection is non-empty
    pub has_children: bool,
}

impl FlatNode {
    /// True for depth-0 nodes
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// True for the selectable leaf level
    #[inline]
    #[must_use]
    pub fn is_role(&self) -> bool {
        self.kind.is_role()
    }
}

/// Flattened tree: ordered node table plus a child index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTree {
    nodes: IndexMap<CompositeId, FlatNode>,
    children: HashMap<CompositeId, Vec<CompositeId>>,
}

impl FlatTree {
    /// Build a table from nodes in display order
    ///
    /// Parent links are taken as given and are not checked for cycles here;
    /// walks over the table carry their own guard.
    ///
    /// # Errors
    /// Returns [`TreeError::DuplicateNode`] if two nodes share a composite id
    pub fn from_nodes(nodes: impl IntoIterator<Item = FlatNode>) -> Result<Self, TreeError> {
        let mut table = Self::default();
        for node in nodes {
            table.push(node)?;
        }
        Ok(table)
    }

    pub(crate) fn push(&mut self, node: FlatNode) -> Result<(), TreeError> {
        let id = node.composite_id;
        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateNode { id });
        }
        if let Some(parent) = node.parent {
            self.children.entry(parent).or_default().push(id);
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Lookup by composite id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &CompositeId) -> Option<&FlatNode> {
        self.nodes.get(id)
    }

    /// True if the id is in this table
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &CompositeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in pre-order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &FlatNode> {
        self.nodes.values()
    }

    /// Number of nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the table has no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node appended (the company for flattener output)
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&FlatNode> {
        self.nodes.first().map(|(_, node)| node)
    }

    /// Direct children in display order
    #[must_use]
    pub fn children_of(&self, id: &CompositeId) -> &[CompositeId] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    /// Parent node, if any and if present in the table
    #[must_use]
    pub fn parent_of(&self, id: &CompositeId) -> Option<&FlatNode> {
        self.get(id)
            .and_then(|node| node.parent.as_ref())
            .and_then(|parent| self.get(parent))
    }

    /// Ancestor keys, nearest first
    ///
    /// Stops at the first parent key missing from the table.
    ///
    /// # Errors
    /// Returns [`TreeError::CyclicHierarchy`] if the parent chain loops
    pub fn ancestors_of(&self, id: &CompositeId) -> Result<Vec<CompositeId>, TreeError> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::from([*id]);
        let mut current = self.get(id).and_then(|node| node.parent);

        while let Some(parent) = current {
            if !seen.insert(parent) {
                return Err(TreeError::CyclicHierarchy { at: parent });
            }
            let Some(node) = self.get(&parent) else {
                break;
            };
            ancestors.push(parent);
            current = node.parent;
        }

        Ok(ancestors)
    }

    /// Backend id for a composite id
    #[inline]
    #[must_use]
    pub fn numeric_id_of(&self, id: &CompositeId) -> Option<i64> {
        self.get(id).map(|node| node.numeric_id)
    }

    /// All role nodes in pre-order
    pub fn roles(&self) -> impl Iterator<Item = &FlatNode> {
        self.iter().filter(|node| node.is_role())
    }

    /// Composite ids in pre-order
    pub fn ids(&self) -> impl Iterator<Item = &CompositeId> {
        self.nodes.keys()
    }
}

impl<'a> IntoIterator for &'a FlatTree {
    type Item = &'a FlatNode;
    type IntoIter = indexmap::map::Values<'a, CompositeId, FlatNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: NodeKind, id: i64, parent: Option<CompositeId>, depth: usize) -> FlatNode {
        FlatNode {
            composite_id: CompositeId::new(kind, id),
            numeric_id: id,
            name: format!("{kind} {id}"),
            kind,
            depth,
            display_path: format!("{kind} {id}"),
            parent,
            has_children: false,
        }
    }

    fn chain() -> FlatTree {
        let company = CompositeId::new(NodeKind::Company, 1);
        let bu = CompositeId::new(NodeKind::BusinessUnit, 1);
        FlatTree::from_nodes([
            node(NodeKind::Company, 1, None, 0),
            node(NodeKind::BusinessUnit, 1, Some(company), 1),
            node(NodeKind::Region, 1, Some(bu), 2),
            node(NodeKind::Region, 2, Some(bu), 2),
        ])
        .unwrap()
    }

    #[test]
    fn table_preserves_insertion_order() {
        let table = chain();
        let ids: Vec<String> = table.ids().map(ToString::to_string).collect();
        assert_eq!(ids, ["company-1", "business_unit-1", "region-1", "region-2"]);
        assert_eq!(table.root().unwrap().kind, NodeKind::Company);
    }

    #[test]
    fn table_children_index() {
        let table = chain();
        let bu = CompositeId::new(NodeKind::BusinessUnit, 1);
        assert_eq!(
            table.children_of(&bu),
            &[CompositeId::new(NodeKind::Region, 1), CompositeId::new(NodeKind::Region, 2)]
        );
        assert!(table.children_of(&CompositeId::role(99)).is_empty());
    }

    #[test]
    fn table_ancestors_nearest_first() {
        let table = chain();
        let ancestors = table.ancestors_of(&CompositeId::new(NodeKind::Region, 2)).unwrap();
        assert_eq!(
            ancestors,
            vec![
                CompositeId::new(NodeKind::BusinessUnit, 1),
                CompositeId::new(NodeKind::Company, 1)
            ]
        );
    }

    #[test]
    fn table_rejects_duplicates() {
        let result = FlatTree::from_nodes([
            node(NodeKind::Site, 1, None, 0),
            node(NodeKind::Site, 1, None, 0),
        ]);
        assert!(matches!(result, Err(TreeError::DuplicateNode { .. })));
    }

    #[test]
    fn table_ancestors_detect_cycle() {
        let a = CompositeId::new(NodeKind::Site, 1);
        let b = CompositeId::new(NodeKind::Site, 2);
        let table = FlatTree::from_nodes([
            node(NodeKind::Site, 1, Some(b), 1),
            node(NodeKind::Site, 2, Some(a), 1),
        ])
        .unwrap();

        let result = table.ancestors_of(&a);
        assert!(matches!(result, Err(TreeError::CyclicHierarchy { .. })));
    }

    #[test]
    fn flat_node_serializes_camel_case() {
        let parent = CompositeId::new(NodeKind::Site, 1);
        let json = serde_json::to_value(node(NodeKind::Role, 10, Some(parent), 4)).unwrap();
        assert_eq!(json["compositeId"], "role-10");
        assert_eq!(json["numericId"], 10);
        assert_eq!(json["type"], "role");
        assert_eq!(json["parentCompositeId"], "site-1");
        assert_eq!(json["hasChildren"], false);
    }
}
