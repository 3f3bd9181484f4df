//! Composite node identifiers
//!
//! Numeric ids come from independent per-level sequences, so a region and a
//! site may both be `5`. [`CompositeId`] pairs the level with the numeric id
//! and renders as `"<type>-<numericId>"`, e.g. `"region-5"`.

use crate::kind::NodeKind;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Node identifier unique across every level of one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeId {
    kind: NodeKind,
    numeric_id: i64,
}

impl CompositeId {
    /// Create from level and numeric id
    #[inline]
    #[must_use]
    pub const fn new(kind: NodeKind, numeric_id: i64) -> Self {
        Self { kind, numeric_id }
    }

    /// Shorthand for a role id
    #[inline]
    #[must_use]
    pub const fn role(numeric_id: i64) -> Self {
        Self::new(NodeKind::Role, numeric_id)
    }

    /// Level of the node
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Backend id, only unique within [`Self::kind`]
    #[inline]
    #[must_use]
    pub const fn numeric_id(&self) -> i64 {
        self.numeric_id
    }

    /// True if this addresses a role
    #[inline]
    #[must_use]
    pub const fn is_role(&self) -> bool {
        self.kind.is_role()
    }
}

impl Display for CompositeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.numeric_id)
    }
}

impl FromStr for CompositeId {
    type Err = CompositeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Kind names contain underscores, never dashes; negative ids add a
        // second dash, so split on the first one.
        let (kind, id) = s
            .split_once('-')
            .ok_or_else(|| CompositeIdError::MissingSeparator(s.to_string()))?;

        let kind = kind
            .parse::<NodeKind>()
            .map_err(|_| CompositeIdError::UnknownKind(kind.to_string()))?;
        let numeric_id = id
            .parse::<i64>()
            .map_err(|_| CompositeIdError::InvalidNumericId(id.to_string()))?;

        Ok(Self::new(kind, numeric_id))
    }
}

impl Serialize for CompositeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CompositeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors parsing a composite id string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositeIdError {
    /// No `-` between type and id
    #[error("composite id '{0}' has no type separator")]
    MissingSeparator(String),

    /// Type prefix is not a hierarchy level
    #[error("unknown node type in composite id: '{0}'")]
    UnknownKind(String),

    /// Suffix is not an integer
    #[error("invalid numeric id in composite id: '{0}'")]
    InvalidNumericId(String),
}
