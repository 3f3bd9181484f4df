//! Hierarchy levels
//!
//! Provides [`NodeKind`], the closed set of organisational levels a tree node
//! can occupy.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Organisational hierarchy level
///
/// The order is fixed and total:
/// `company → business_unit → region → site → asset_group → work_group → role`.
/// Roles may nest under roles through `reporting_roles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Tree root
    Company,
    /// Business unit within a company
    BusinessUnit,
    /// Region within a business unit
    Region,
    /// Site within a region
    Site,
    /// Asset group within a site
    AssetGroup,
    /// Work group within an asset group
    WorkGroup,
    /// Selectable leaf (may carry reporting roles)
    Role,
}

impl NodeKind {
    /// Every level, root first
    pub const ALL: [NodeKind; 7] = [
        NodeKind::Company,
        NodeKind::BusinessUnit,
        NodeKind::Region,
        NodeKind::Site,
        NodeKind::AssetGroup,
        NodeKind::WorkGroup,
        NodeKind::Role,
    ];

    /// Wire name, as used in composite ids and the backend `type` field
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Company => "company",
            NodeKind::BusinessUnit => "business_unit",
            NodeKind::Region => "region",
            NodeKind::Site => "site",
            NodeKind::AssetGroup => "asset_group",
            NodeKind::WorkGroup => "work_group",
            NodeKind::Role => "role",
        }
    }

    /// Kind of this level's children
    ///
    /// Roles report to roles, so `Role` maps to itself.
    #[inline]
    #[must_use]
    pub const fn child_kind(self) -> NodeKind {
        match self {
            NodeKind::Company => NodeKind::BusinessUnit,
            NodeKind::BusinessUnit => NodeKind::Region,
            NodeKind::Region => NodeKind::Site,
            NodeKind::Site => NodeKind::AssetGroup,
            NodeKind::AssetGroup => NodeKind::WorkGroup,
            NodeKind::WorkGroup | NodeKind::Role => NodeKind::Role,
        }
    }

    /// Backend key holding this level's children
    #[inline]
    #[must_use]
    pub const fn children_key(self) -> &'static str {
        match self {
            NodeKind::Company => "business_units",
            NodeKind::BusinessUnit => "regions",
            NodeKind::Region => "sites",
            NodeKind::Site => "asset_groups",
            NodeKind::AssetGroup => "work_groups",
            NodeKind::WorkGroup => "roles",
            NodeKind::Role => "reporting_roles",
        }
    }

    /// Position in the hierarchy (company = 0)
    #[inline]
    #[must_use]
    pub const fn depth_rank(self) -> usize {
        self as usize
    }

    /// True for the selectable leaf level
    #[inline]
    #[must_use]
    pub const fn is_role(self) -> bool {
        matches!(self, NodeKind::Role)
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Unrecognised level name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node type: '{0}'")]
pub struct UnknownKind(pub String);
