//! orgscope Tree
//!
//! Organisational hierarchy model and composite-addressed flattening.
//!
//! # Overview
//!
//! - [`TreeNode`]: nested backend tree, one typed struct per level
//! - [`CompositeId`]: `"<type>-<numericId>"` key, unique across levels
//! - [`flatten`]: depth-first, pre-order conversion into a [`FlatTree`]
//! - [`FlatTree`]: arena of [`FlatNode`]s with parent-by-key links
//!
//! # Example
//!
//! ```rust
//! use orgscope_tree::{flatten, CompositeId, NodeKind, TreeNode};
//!
//! let tree = TreeNode::from_json(r#"{
//!     "type": "company", "id": 1, "name": "Acme",
//!     "business_units": [{ "id": 5, "name": "Ops",
//!         "regions": [{ "id": 5, "name": "North" }] }]
//! }"#).unwrap();
//!
//! let flat = flatten(&tree).unwrap();
//! assert_eq!(flat.len(), 3);
//! assert!(flat.contains(&CompositeId::new(NodeKind::Region, 5)));
//! assert!(flat.contains(&CompositeId::new(NodeKind::BusinessUnit, 5)));
//! ```

#![warn(missing_docs)]

pub mod composite;
pub mod error;
pub mod flat;
pub mod flatten;
pub mod kind;
pub mod node;

// Re-exports
pub use composite::{CompositeId, CompositeIdError};
pub use error::{TreeError, TreeResult};
pub use flat::{FlatNode, FlatTree};
pub use flatten::{flatten, Flattener, DEFAULT_SEPARATOR};
pub use kind::{NodeKind, UnknownKind};
pub use node::{
    AssetGroupNode, BusinessUnitNode, CompanyNode, Level, RegionNode, RoleNode, SiteNode,
    TreeNode, WorkGroupNode,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for tree operations
    pub use crate::{flatten, CompositeId, FlatNode, FlatTree, Flattener, NodeKind, TreeError, TreeNode};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
