//! Nested organisational tree as delivered by the backend
//!
//! Each level is its own struct holding the typed collection of the next
//! level down, so a site can only ever contain asset groups. [`TreeNode`] is
//! the tagged entry point used for the root, discriminated by `type`.
//!
//! `id` and `name` are optional at this layer on purpose: a record missing
//! them still decodes, and the flattener reports it with the path to the bad
//! record instead of an opaque decode error.
//!
//! Keys a level does not know, such as `roles` placed directly on a site,
//! are kept in that level's `extra` map rather than rejected. They never
//! become children; the flattener logs them at debug level and moves on.

use crate::error::TreeError;
use crate::kind::NodeKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One level of the hierarchy
///
/// This trait is **sealed**; the seven level structs in this module are the
/// only implementors. The associated `Child` type is the compile-time
/// dispatch table from a level to its child collection.
pub trait Level: private::Sealed + std::fmt::Debug {
    /// Level of this node
    const KIND: NodeKind;

    /// Type of the child collection entries
    type Child: Level;

    /// Backend id, if present
    fn id(&self) -> Option<i64>;

    /// Display name, if present
    fn name(&self) -> Option<&str>;

    /// Children in backend order
    fn children(&self) -> &[Self::Child];

    /// Keys this level does not recognise
    fn extra(&self) -> &BTreeMap<String, serde_json::Value>;
}

/// Sealed trait support
#[doc(hidden)]
pub mod private {
    /// Sealed trait marker
    pub trait Sealed {}
}

macro_rules! level {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:expr, $child:ty, $field:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            /// Backend id (per-level sequence)
            #[serde(default)]
            pub id: Option<i64>,

            /// Display name
            #[serde(default)]
            pub name: Option<String>,

            /// Children of the next level down
            #[serde(default)]
            pub $field: Vec<$child>,

            /// Unrecognised keys, never walked
            #[serde(flatten)]
            pub extra: BTreeMap<String, serde_json::Value>,
        }

        impl $name {
            /// Create a node with id and name and no children
            #[must_use]
            pub fn new(id: i64, name: impl Into<String>) -> Self {
                Self {
                    id: Some(id),
                    name: Some(name.into()),
                    $field: Vec::new(),
                    extra: BTreeMap::new(),
                }
            }

            /// Append children
            #[must_use]
            pub fn with_children(mut self, children: impl IntoIterator<Item = $child>) -> Self {
                self.$field.extend(children);
                self
            }
        }

        impl private::Sealed for $name {}

        impl Level for $name {
            const KIND: NodeKind = $kind;
            type Child = $child;

            #[inline]
            fn id(&self) -> Option<i64> {
                self.id
            }

            #[inline]
            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }

            #[inline]
            fn children(&self) -> &[$child] {
                &self.$field
            }

            #[inline]
            fn extra(&self) -> &BTreeMap<String, serde_json::Value> {
                &self.extra
            }
        }
    };
}

level!(
    /// Company: tree root
    CompanyNode, NodeKind::Company, BusinessUnitNode, business_units
);
level!(
    /// Business unit
    BusinessUnitNode, NodeKind::BusinessUnit, RegionNode, regions
);
level!(
    /// Region
    RegionNode, NodeKind::Region, SiteNode, sites
);
level!(
    /// Site
    SiteNode, NodeKind::Site, AssetGroupNode, asset_groups
);
level!(
    /// Asset group
    AssetGroupNode, NodeKind::AssetGroup, WorkGroupNode, work_groups
);
level!(
    /// Work group
    WorkGroupNode, NodeKind::WorkGroup, RoleNode, roles
);
level!(
    /// Role, with its direct reports
    RoleNode, NodeKind::Role, RoleNode, reporting_roles
);

/// Tagged tree node
///
/// Decodes from backend JSON of the form
/// `{"type": "company", "id": 1, "name": "Acme", "business_units": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Company
    Company(CompanyNode),
    /// Business unit
    BusinessUnit(BusinessUnitNode),
    /// Region
    Region(RegionNode),
    /// Site
    Site(SiteNode),
    /// Asset group
    AssetGroup(AssetGroupNode),
    /// Work group
    WorkGroup(WorkGroupNode),
    /// Role
    Role(RoleNode),
}

impl TreeNode {
    /// Decode a tree from JSON text
    ///
    /// # Errors
    /// Returns [`TreeError::Decode`] if the text is not a valid tree
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a tree from an already-parsed JSON value
    ///
    /// # Errors
    /// Returns [`TreeError::Decode`] if the value is not a valid tree
    pub fn from_value(value: serde_json::Value) -> Result<Self, TreeError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Level of this node
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            TreeNode::Company(_) => NodeKind::Company,
            TreeNode::BusinessUnit(_) => NodeKind::BusinessUnit,
            TreeNode::Region(_) => NodeKind::Region,
            TreeNode::Site(_) => NodeKind::Site,
            TreeNode::AssetGroup(_) => NodeKind::AssetGroup,
            TreeNode::WorkGroup(_) => NodeKind::WorkGroup,
            TreeNode::Role(_) => NodeKind::Role,
        }
    }

    /// Backend id, if present
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        match self {
            TreeNode::Company(n) => n.id(),
            TreeNode::BusinessUnit(n) => n.id(),
            TreeNode::Region(n) => n.id(),
            TreeNode::Site(n) => n.id(),
            TreeNode::AssetGroup(n) => n.id(),
            TreeNode::WorkGroup(n) => n.id(),
            TreeNode::Role(n) => n.id(),
        }
    }

    /// Display name, if present
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            TreeNode::Company(n) => n.name(),
            TreeNode::BusinessUnit(n) => n.name(),
            TreeNode::Region(n) => n.name(),
            TreeNode::Site(n) => n.name(),
            TreeNode::AssetGroup(n) => n.name(),
            TreeNode::WorkGroup(n) => n.name(),
            TreeNode::Role(n) => n.name(),
        }
    }

    /// Number of direct children
    #[must_use]
    pub fn child_count(&self) -> usize {
        match self {
            TreeNode::Company(n) => n.children().len(),
            TreeNode::BusinessUnit(n) => n.children().len(),
            TreeNode::Region(n) => n.children().len(),
            TreeNode::Site(n) => n.children().len(),
            TreeNode::AssetGroup(n) => n.children().len(),
            TreeNode::WorkGroup(n) => n.children().len(),
            TreeNode::Role(n) => n.children().len(),
        }
    }
}

impl From<CompanyNode> for TreeNode {
    fn from(node: CompanyNode) -> Self {
        TreeNode::Company(node)
    }
}
