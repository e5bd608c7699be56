//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// The filter directive could not be parsed.
    #[error("Invalid log filter '{directive}': {reason}")]
    InvalidFilter {
        /// The directive as given.
        directive: String,
        /// Parser message.
        reason: String,
    },
}
