//! Session configuration
//!
//! Loaded from TOML or YAML; every field has a default so partial files are
//! accepted.

use crate::error::ConfigError;
use crate::types::InterviewType;
use orgscope_tree::DEFAULT_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Interview setting for new sessions
    pub default_interview_type: InterviewType,
    /// Breadcrumb separator used when flattening
    pub path_separator: String,
    /// Start sessions in public-interview mode
    pub public_interview: bool,
    /// Logging setup
    pub logging: LoggingConfig,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            default_interview_type: InterviewType::default(),
            path_separator: DEFAULT_SEPARATOR.to_string(),
            public_interview: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl ScopeConfig {
    /// Parse and validate TOML
    ///
    /// # Errors
    /// Returns error if the text is not valid TOML or fails [`Self::validate`]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML
    ///
    /// # Errors
    /// Returns error if the text is not valid YAML or fails [`Self::validate`]
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    ///
    /// # Errors
    /// Returns error on read failure, unknown extension, or invalid content
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("yaml" | "yml") => Self::from_yaml_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse(&text)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Check field constraints
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for an empty separator or an
    /// unparseable log filter
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path_separator.is_empty() {
            return Err(ConfigError::Invalid("path_separator must not be empty".into()));
        }
        self.logging.validate()
    }

    /// Set the interview type
    #[must_use]
    pub fn with_interview_type(mut self, interview_type: InterviewType) -> Self {
        self.default_interview_type = interview_type;
        self
    }

    /// Set the breadcrumb separator
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = separator.into();
        self
    }

    /// Set the initial public-interview mode
    #[must_use]
    pub fn with_public_interview(mut self, public: bool) -> Self {
        self.public_interview = public;
        self
    }

    /// Set logging options
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }
}

/// Logging options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, overridden by `RUST_LOG`
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Check the filter directives parse
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for an empty or malformed filter
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.filter must not be empty".into()));
        }
        tracing_subscriber::EnvFilter::try_new(&self.filter)
            .map(|_| ())
            .map_err(|err| ConfigError::Invalid(format!("logging.filter: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ScopeConfig::default();
        assert_eq!(config.default_interview_type, InterviewType::Onsite);
        assert_eq!(config.path_separator, " > ");
        assert!(!config.public_interview);
        assert_eq!(config.logging.filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ScopeConfig::from_toml_str("public_interview = true\n").unwrap();
        assert!(config.public_interview);
        assert_eq!(config.path_separator, " > ");
    }

    #[test]
    fn empty_separator_rejected() {
        let result = ScopeConfig::from_toml_str("path_separator = \"\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn bad_filter_rejected() {
        let logging = LoggingConfig {
            filter: "orgscope=loud".into(),
            json: false,
        };
        assert!(matches!(logging.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_extension_rejected() {
        let result = ScopeConfig::from_path("scope.ini");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn builder_chain() {
        let config = ScopeConfig::default()
            .with_interview_type(InterviewType::Presite)
            .with_separator(" / ")
            .with_public_interview(true);
        assert_eq!(config.default_interview_type, InterviewType::Presite);
        assert_eq!(config.path_separator, " / ");
        assert!(config.public_interview);
    }
}
