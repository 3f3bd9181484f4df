//! Depth-first flattening of a nested hierarchy
//!
//! Provides [`Flattener`] and the [`flatten`] shorthand.

use crate::composite::CompositeId;
use crate::error::TreeError;
use crate::flat::{FlatNode, FlatTree};
use crate::kind::NodeKind;
use crate::node::{Level, TreeNode};

/// Default breadcrumb separator
pub const DEFAULT_SEPARATOR: &str = " > ";

/// Flatten a company tree with the default separator
///
/// # Errors
/// See [`Flattener::flatten`]
pub fn flatten(root: &TreeNode) -> Result<FlatTree, TreeError> {
    Flattener::default().flatten(root)
}

/// Converts a nested tree into a [`FlatTree`]
///
/// # Contract
/// - Pre-order: a node precedes its children; siblings keep input order
/// - Pure and deterministic: equal input yields equal output
/// - Root must be a company
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flattener {
    separator: String,
}

impl Flattener {
    /// Create with a custom breadcrumb separator
    #[inline]
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Breadcrumb separator
    #[inline]
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Flatten a tree rooted at a company
    ///
    /// # Errors
    /// - [`TreeError::InvalidRoot`] if the root is not a company
    /// - [`TreeError::MalformedNode`] if any node lacks an `id`
    /// - [`TreeError::DuplicateNode`] if two nodes share a composite id
    pub fn flatten(&self, root: &TreeNode) -> Result<FlatTree, TreeError> {
        let TreeNode::Company(company) = root else {
            return Err(TreeError::InvalidRoot { found: root.kind() });
        };

        let mut walk = Walk {
            separator: &self.separator,
            table: FlatTree::default(),
            path: Vec::new(),
        };
        walk.visit(company, None)?;

        tracing::debug!(nodes = walk.table.len(), "flattened hierarchy");
        Ok(walk.table)
    }
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

/// Parent context handed down the recursion
struct ParentFrame<'a> {
    id: CompositeId,
    display_path: &'a str,
    depth: usize,
}

struct Walk<'s> {
    separator: &'s str,
    table: FlatTree,
    /// Composite ids from the root to the node being visited
    path: Vec<CompositeId>,
}

impl Walk<'_> {
    fn visit<L: Level>(&mut self, node: &L, parent: Option<ParentFrame<'_>>) -> Result<(), TreeError> {
        let Some(numeric_id) = node.id() else {
            return Err(TreeError::malformed(self.pending_path(L::KIND), "id"));
        };
        let composite_id = CompositeId::new(L::KIND, numeric_id);
        let name = display_name(L::KIND, numeric_id, node.name());
        if !node.extra().is_empty() {
            tracing::debug!(
                id = %composite_id,
                keys = ?node.extra().keys().collect::<Vec<_>>(),
                "ignoring unrecognised keys"
            );
        }

        let (depth, display_path) = match &parent {
            Some(frame) => (
                frame.depth + 1,
                format!("{}{}{}", frame.display_path, self.separator, name),
            ),
            None => (0, name.clone()),
        };

        self.table.push(FlatNode {
            composite_id,
            numeric_id,
            name,
            kind: L::KIND,
            depth,
            display_path: display_path.clone(),
            parent: parent.as_ref().map(|frame| frame.id),
            has_children: !node.children().is_empty(),
        })?;

        self.path.push(composite_id);
        for child in node.children() {
            self.visit(
                child,
                Some(ParentFrame {
                    id: composite_id,
                    display_path: &display_path,
                    depth,
                }),
            )?;
        }
        self.path.pop();

        Ok(())
    }

    /// Location of a node whose id is unknown: `company-1/region-3/site-?`
    fn pending_path(&self, kind: NodeKind) -> String {
        let mut segments: Vec<String> = self.path.iter().map(ToString::to_string).collect();
        segments.push(format!("{kind}-?"));
        segments.join("/")
    }
}

/// Name to display, falling back to `"<type> <id>"` when missing or blank
fn display_name(kind: NodeKind, numeric_id: i64, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => {
            tracing::debug!(%kind, numeric_id, "node has no name, using placeholder");
            format!("{kind} {numeric_id}")
        }
    }
}
