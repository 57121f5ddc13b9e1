//! Logging setup

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::LoggingConfig;

/// Telemetry setup errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log directive: {0}")]
    InvalidDirective(String),

    #[error("A global subscriber is already installed")]
    AlreadyInstalled,
}

/// Build the level filter, preferring `RUST_LOG` over the configured default
pub fn log_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.default_directive)
            .map_err(|e| TelemetryError::InvalidDirective(e.to_string())),
    }
}

/// Install the global `tracing` subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(log_filter(config)?)
        .with_target(config.with_target);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|_| TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_rejected() {
        let config = LoggingConfig::default();
        let _ = init_logging(&config);

        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::AlreadyInstalled)
        ));
    }

    #[test]
    fn test_presets() {
        assert!(LoggingConfig::json().json);
        assert_eq!(LoggingConfig::verbose().default_directive, "debug");
        assert_eq!(LoggingConfig::default().default_directive, "info");
    }
}
