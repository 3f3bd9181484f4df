//! orgscope Select
//!
//! Cascading role selection over a flattened organisational hierarchy.
//!
//! # Overview
//!
//! - [`descendant_role_ids`]: the roles a node stands for
//! - [`selection_state_for`] / [`TriStateView`]: `full` / `partial` / `none` badges
//! - [`toggle`] / [`SelectionEngine`]: cascade select and deselect
//! - [`is_visible`] / [`ExpansionSet`] / [`SearchQuery`]: row filtering
//!
//! # Example
//!
//! ```rust
//! use orgscope_select::{toggle, selection_state_for, SelectionState, TriState};
//! use orgscope_tree::{flatten, CompositeId, NodeKind, TreeNode};
//!
//! let tree = TreeNode::from_json(r#"{
//!     "type": "company", "id": 1, "name": "Acme",
//!     "business_units": [{ "id": 1, "name": "Ops", "regions": [{ "id": 1, "name": "North",
//!         "sites": [{ "id": 1, "name": "Plant", "asset_groups": [{ "id": 1, "name": "Crushers",
//!             "work_groups": [{ "id": 1, "name": "Day", "roles": [
//!                 { "id": 10, "name": "Operator" }, { "id": 11, "name": "Fitter" }
//!             ] }] }] }] }] }]
//! }"#).unwrap();
//! let flat = flatten(&tree).unwrap();
//! let site = CompositeId::new(NodeKind::Site, 1);
//!
//! let selected = toggle(&flat, &site, &SelectionState::new()).unwrap();
//! assert_eq!(selected.len(), 2);
//! assert_eq!(selection_state_for(&flat, &site, &selected).unwrap(), TriState::Full);
//! ```

#![warn(missing_docs)]

pub mod resolve;
pub mod selection;
pub mod tristate;
pub mod visibility;

// Re-exports
pub use resolve::{descendant_role_ids, descendant_role_set};
pub use selection::{clear, toggle, NotARole, SelectionEngine, SelectionState};
pub use tristate::{selection_state_for, RoleCounts, TriState, TriStateView};
pub use visibility::{is_visible, visible_nodes, ExpansionSet, SearchQuery};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for selection operations
    pub use crate::{
        descendant_role_ids, is_visible, selection_state_for, toggle, ExpansionSet, SearchQuery,
        SelectionEngine, SelectionState, TriState, TriStateView,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
