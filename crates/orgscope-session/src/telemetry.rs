//! Logging setup
//!
//! `RUST_LOG` takes precedence over the configured filter.

use crate::config::LoggingConfig;
use crate::error::TelemetryError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber
///
/// # Errors
/// Returns error if the filter does not parse or a subscriber is already set
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry.with(fmt::layer().json().with_target(true)).try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }

    tracing::debug!(json = config.json, "logging initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails_instead_of_panicking() {
        let config = LoggingConfig::default();
        // Another test may have installed a subscriber first; either way the
        // second call must report an error.
        let _ = init(&config);
        assert!(matches!(init(&config), Err(TelemetryError::AlreadyInitialized(_))));
    }
}
