//! Error types for the session layer
//!
//! Covers:
//! - Confirmation preconditions (no tree, empty selection, pending lookups)
//! - Collaborator failures
//! - Configuration loading
//! - Logging setup

use orgscope_tree::TreeError;
use std::path::PathBuf;

/// Main session error type
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No hierarchy has been loaded yet
    #[error("no hierarchy loaded")]
    NoTree,

    /// Nothing is selected
    #[error("no roles selected")]
    EmptySelection,

    /// The applicability answer for the current selection has not arrived
    #[error("applicability check pending for the current selection")]
    ValidationPending,

    /// Public-interview contacts for the current selection have not arrived
    #[error("contact lookup pending for the current selection")]
    ContactsPending,

    /// The questionnaire has no questions for the selected roles
    #[error("questionnaire {questionnaire_id} has no questions for the selected roles")]
    NotApplicable {
        /// Questionnaire that was checked
        questionnaire_id: i64,
    },

    /// No questionnaire chosen
    #[error("no questionnaire selected")]
    NoQuestionnaire,

    /// Hierarchy data error
    #[error("hierarchy error: {0}")]
    Tree(#[from] TreeError),

    /// External collaborator failed
    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// True if the caller can wait for an in-flight lookup and try again
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::ValidationPending | Self::ContactsPending)
    }

    /// True if retrying the same call may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Collaborator(err) => err.is_retryable(),
            other => other.is_pending(),
        }
    }
}

/// Failures reported by tree, validation, contact and submission services
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// Service unreachable or timed out
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Service refused the request
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl CollaboratorError {
    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Create unavailable error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    /// Create rejected error
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or shape error
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML syntax or shape error
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Extension is neither TOML nor YAML
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Values parsed but failed validation
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Logging setup errors
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Filter directive did not parse
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber is already installed
    #[error("logging already initialised: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
