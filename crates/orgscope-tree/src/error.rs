//! Error types for tree decoding and flattening
//!
//! All variants describe bad external input (usually a backend data issue);
//! none of them is retried by this crate.

use crate::composite::CompositeId;
use crate::kind::NodeKind;

/// Errors raised while decoding, flattening or walking a hierarchy
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Root is not a company
    #[error("tree root must be a company, got {found}")]
    InvalidRoot {
        /// Kind the root record carried
        found: NodeKind,
    },

    /// A record lacks a required field
    #[error("malformed node at {path}: missing {field}")]
    MalformedNode {
        /// Display path of the offending record
        path: String,
        /// Name of the missing field
        field: &'static str,
    },

    /// Two records flatten to the same composite id
    #[error("duplicate node: {id}")]
    DuplicateNode {
        /// Id seen twice
        id: CompositeId,
    },

    /// Parent links loop back on themselves
    #[error("cyclic hierarchy detected at {at}")]
    CyclicHierarchy {
        /// First id revisited on the walk
        at: CompositeId,
    },

    /// JSON did not describe a tree
    #[error("failed to decode tree: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TreeError {
    /// Create malformed-node error
    pub fn malformed(path: impl Into<String>, field: &'static str) -> Self {
        Self::MalformedNode {
            path: path.into(),
            field,
        }
    }

    /// True for errors that indicate corrupt upstream data
    #[inline]
    #[must_use]
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Self::MalformedNode { .. } | Self::DuplicateNode { .. } | Self::CyclicHierarchy { .. }
        )
    }
}

/// Result type alias for tree operations
pub type TreeResult<T> = Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_root_display() {
        let err = TreeError::InvalidRoot {
            found: NodeKind::Site,
        };
        assert_eq!(err.to_string(), "tree root must be a company, got site");
    }

    #[test]
    fn malformed_display() {
        let err = TreeError::malformed("company-1/region-?", "id");
        assert_eq!(err.to_string(), "malformed node at company-1/region-?: missing id");
        assert!(err.is_data_integrity());
    }

    #[test]
    fn cyclic_display() {
        let err = TreeError::CyclicHierarchy {
            at: CompositeId::new(NodeKind::Site, 3),
        };
        assert_eq!(err.to_string(), "cyclic hierarchy detected at site-3");
    }
}
