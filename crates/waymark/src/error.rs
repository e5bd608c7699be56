//! Facade error types.

use thiserror::Error;
use waymark_config::ConfigError;
use waymark_router::RouterError;
use waymark_telemetry::TelemetryError;

/// Why one manifest entry was not registered.
#[derive(Error, Debug)]
pub enum EndpointFailure {
    /// Compilation, path or duplicate-route failure.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// The handler lookup returned nothing for the endpoint.
    #[error("endpoint '{endpoint}': no handler bound")]
    MissingHandler {
        /// Identifier of the endpoint.
        endpoint: String,
    },
}

impl EndpointFailure {
    /// Identifier of the rejected endpoint.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Router(err) => err.endpoint(),
            Self::MissingHandler { endpoint } => endpoint,
        }
    }

    /// The router error, when the failure came from registration.
    pub fn as_router_error(&self) -> Option<&RouterError> {
        match self {
            Self::Router(err) => Some(err),
            Self::MissingHandler { .. } => None,
        }
    }
}

/// Every endpoint of a manifest that could not be registered.
#[derive(Error, Debug)]
#[error("{} of {} endpoint(s) rejected: {}", .failures.len(), .total, summary(.failures))]
pub struct ManifestError {
    failures: Vec<EndpointFailure>,
    total: usize,
}

impl ManifestError {
    pub(crate) fn new(failures: Vec<EndpointFailure>, total: usize) -> Self {
        Self { failures, total }
    }

    /// Failures in manifest order.
    pub fn failures(&self) -> &[EndpointFailure] {
        &self.failures
    }

    /// Number of entries in the manifest.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Identifiers of the rejected endpoints.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(EndpointFailure::endpoint)
    }
}

fn summary(failures: &[EndpointFailure]) -> String {
    failures
        .iter()
        .map(EndpointFailure::endpoint)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Any failure while starting Waymark.
#[derive(Error, Debug)]
pub enum WaymarkError {
    /// Settings or manifest could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging could not be initialised.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// Route table prefix is not a valid path template.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// One or more manifest entries were rejected.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Result type for facade operations.
pub type WaymarkResult<T> = Result<T, WaymarkError>;
