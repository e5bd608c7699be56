//! Logging setup for Waymark.
//!
//! Waymark reports compilation warnings and registration steps through the
//! `tracing` facade. This crate installs a `tracing-subscriber` pipeline
//! with an [`EnvFilter`](tracing_subscriber::EnvFilter) and JSON or
//! human-readable output.
//!
//! # Standard Fields
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `endpoint` | Endpoint identifier |
//! | `preset` | Requested preset |
//! | `method` | HTTP verb |
//! | `path` | Path template |
//! | `options` | Option names involved in a warning |
//!
//! # Example
//!
//! ```rust,ignore
//! use waymark_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production())?;
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
