//! Registration errors.

use thiserror::Error;
use waymark_options::{HttpMethod, OptionsError};

/// Result type alias using [`RouterError`].
pub type RouterResult<T> = Result<T, RouterError>;

/// Errors raised while registering endpoints.
///
/// Every variant names the endpoint being registered.
#[derive(Error, Debug)]
pub enum RouterError {
    /// The endpoint's options failed to compile.
    #[error("endpoint '{endpoint}': {source}")]
    Compile {
        /// Identifier of the endpoint.
        endpoint: String,
        /// The compilation failure.
        #[source]
        source: OptionsError,
    },

    /// Another endpoint already serves this verb and path.
    #[error("endpoint '{endpoint}': {method} {path} is already registered by '{existing}'")]
    DuplicateRoute {
        /// Identifier of the endpoint being registered.
        endpoint: String,
        /// The contested verb.
        method: HttpMethod,
        /// The contested path template, prefix included.
        path: String,
        /// Identifier of the endpoint registered first.
        existing: String,
    },

    /// The endpoint's path is not a usable template.
    #[error("endpoint '{endpoint}': invalid path '{path}': {reason}")]
    InvalidPath {
        /// Identifier of the endpoint.
        endpoint: String,
        /// The path as written.
        path: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl RouterError {
    /// Create a new compile error.
    pub fn compile(endpoint: impl Into<String>, source: OptionsError) -> Self {
        Self::Compile {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Create a new invalid path error from a template failure.
    pub fn invalid_path(
        endpoint: impl Into<String>,
        path: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidPath {
            endpoint: endpoint.into(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Identifier of the endpoint that failed.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Compile { endpoint, .. }
            | Self::DuplicateRoute { endpoint, .. }
            | Self::InvalidPath { endpoint, .. } => endpoint,
        }
    }

    /// The underlying option error, when compilation failed.
    pub fn as_options_error(&self) -> Option<&OptionsError> {
        match self {
            Self::Compile { source, .. } => Some(source),
            _ => None,
        }
    }
}
