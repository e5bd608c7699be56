//! Structured logging setup.
//!
//! Route compilation reports warnings and registration steps through
//! `tracing`; this module installs the subscriber that prints them.
//!
//! # Example
//!
//! ```rust,ignore
//! use waymark_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!(endpoint = "listUsers", "Endpoint ready");
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::{TelemetryError, TelemetryResult};

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Multi-line, human-readable.
    Pretty,
    /// Single-line, human-readable.
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Filter directive (e.g. "info" or "waymark_options=debug,warn").
    pub level: String,

    /// Line format.
    pub format: LogFormat,

    /// Whether to colour human-readable output.
    pub ansi: bool,

    /// Whether to include span open/close events.
    pub span_events: bool,

    /// Whether to include file/line info.
    pub file_line_info: bool,

    /// Whether to include the target (module path).
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LogConfig {
    /// Human-readable debug output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            ansi: true,
            span_events: true,
            file_line_info: true,
            include_target: true,
        }
    }

    /// JSON output at info level.
    #[must_use]
    pub fn production() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            format: LogFormat::Json,
            ansi: false,
            span_events: false,
            file_line_info: false,
            include_target: true,
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// Returns `TelemetryError::LoggingInit` when a subscriber is already set.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;
    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let base = tracing_subscriber::fmt::layer()
        .with_span_events(span_events)
        .with_file(config.file_line_info)
        .with_line_number(config.file_line_info)
        .with_target(config.include_target);

    let layer = match config.format {
        LogFormat::Json => base.json().with_filter(filter).boxed(),
        LogFormat::Pretty => base.pretty().with_ansi(config.ansi).with_filter(filter).boxed(),
        LogFormat::Compact => base.compact().with_ansi(config.ansi).with_filter(filter).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Parses a filter directive.
pub fn create_env_filter(directive: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| TelemetryError::InvalidFilter {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Standard log field names.
pub mod fields {
    /// Endpoint identifier.
    pub const ENDPOINT: &str = "endpoint";

    /// Preset name.
    pub const PRESET: &str = "preset";

    /// HTTP verb.
    pub const METHOD: &str = "method";

    /// Path template.
    pub const PATH: &str = "path";

    /// Option names involved in a warning.
    pub const OPTIONS: &str = "options";

    /// Warning count.
    pub const WARNINGS: &str = "warnings";

    /// Error text.
    pub const ERROR: &str = "error";
}

/// Logs a successful endpoint registration.
#[macro_export]
macro_rules! log_endpoint_registered {
    ($endpoint:expr, $method:expr, $path:expr) => {
        tracing::info!(
            endpoint = %$endpoint,
            method = %$method,
            path = %$path,
            "Endpoint registered"
        );
    };
}

/// Logs a rejected endpoint.
#[macro_export]
macro_rules! log_endpoint_rejected {
    ($endpoint:expr, $error:expr) => {
        tracing::error!(
            endpoint = %$endpoint,
            error = %$error,
            "Endpoint rejected"
        );
    };
}
