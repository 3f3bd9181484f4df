//! orgscope Session
//!
//! Hosts the selection engine for one user: loads a hierarchy through a
//! [`TreeSource`], tracks selection and view state, keeps applicability and
//! contact answers in step with the latest selection, and hands confirmed
//! scopes to an [`InterviewSubmitter`].
//!
//! # Overview
//!
//! - [`ScopeConfig`]: TOML/YAML configuration
//! - [`ScopeSession`]: single-owner session state
//! - [`SharedSession`]: lock-wrapped session for concurrent lookups
//! - [`telemetry::init`]: `tracing` subscriber setup
//!
//! # Example
//!
//! ```rust
//! use orgscope_session::{ScopeConfig, ScopeSession};
//! use orgscope_tree::{CompositeId, NodeKind, TreeNode};
//!
//! let tree = TreeNode::from_json(r#"{
//!     "type": "company", "id": 1, "name": "Acme",
//!     "business_units": [{ "id": 1, "name": "Ops", "regions": [{ "id": 1, "name": "North",
//!         "sites": [{ "id": 1, "name": "Plant", "asset_groups": [{ "id": 1, "name": "Crushers",
//!             "work_groups": [{ "id": 1, "name": "Day", "roles": [
//!                 { "id": 10, "name": "Operator" }, { "id": 11, "name": "Fitter" }
//!             ] }] }] }] }] }]
//! }"#).unwrap();
//!
//! let mut session = ScopeSession::new(ScopeConfig::default());
//! session.replace_tree(&tree).unwrap();
//! session.toggle(&CompositeId::new(NodeKind::Site, 1)).unwrap();
//! assert_eq!(session.selected_role_ids(), vec![10, 11]);
//! ```

#![warn(missing_docs)]

pub mod collaborator;
pub mod config;
pub mod error;
pub mod session;
pub mod shared;
pub mod telemetry;
pub mod types;

// Re-exports
pub use collaborator::{ApplicabilityValidator, ContactLookup, InterviewSubmitter, TreeSource};
pub use config::{LoggingConfig, ScopeConfig};
pub use error::{CollaboratorError, ConfigError, SessionError, SessionResult, TelemetryError};
pub use session::ScopeSession;
pub use shared::SharedSession;
pub use types::{
    ContactId, ContactMap, ContactRequest, InterviewType, RequestTicket, Submission,
    ValidationRequest,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for session hosts
    pub use crate::{
        ApplicabilityValidator, CollaboratorError, ContactLookup, InterviewSubmitter, ScopeConfig,
        ScopeSession, SessionError, SharedSession, Submission, TreeSource,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
