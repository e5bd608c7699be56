//! Error types for route option compilation.

use std::fmt;

use thiserror::Error;

use crate::RouteWarning;

/// Result type alias using [`OptionsError`].
pub type OptionsResult<T> = Result<T, OptionsError>;

/// Two or more options that cannot be combined on one endpoint.
///
/// # Example
///
/// ```
/// use waymark_options::ConflictError;
///
/// let err = ConflictError::new(["sse", "body"], "SSE endpoints cannot accept a request body");
/// assert_eq!(err.options(), ["sse", "body"]);
/// assert!(err.to_string().contains("sse, body"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictError {
    options: Vec<String>,
    message: String,
}

impl ConflictError {
    /// Creates a conflict between the named options.
    pub fn new<I, S>(options: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Names of the conflicting options, in rule order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Human-readable explanation.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conflicting route options [{}]: {}",
            self.options.join(", "),
            self.message
        )
    }
}

impl std::error::Error for ConflictError {}

/// Errors raised while compiling route options.
#[derive(Error, Debug)]
pub enum OptionsError {
    /// Mutually exclusive options were combined.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// An option holds a value outside its allowed range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted option path (e.g. `cache.ttl`).
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The requested preset is not registered (strict preset policy).
    #[error("unknown route preset: {name}")]
    UnknownPreset {
        /// The preset name as requested.
        name: String,
    },

    /// Warnings were produced while the deny policy was active.
    #[error("route options produced {} warning(s): {}", .warnings.len(), join_warnings(.warnings))]
    DeniedWarnings {
        /// Every warning collected for the endpoint.
        warnings: Vec<RouteWarning>,
    },

    /// A literal fragment could not be decoded.
    #[error("failed to decode route options: {0}")]
    Parse(#[from] serde_json::Error),
}

impl OptionsError {
    /// Create a new conflict error.
    pub fn conflict<I, S>(options: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Conflict(ConflictError::new(options, message))
    }

    /// Create a new invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new unknown preset error.
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        Self::UnknownPreset { name: name.into() }
    }

    /// Returns the conflict details when this is a conflict error.
    pub fn as_conflict(&self) -> Option<&ConflictError> {
        match self {
            Self::Conflict(conflict) => Some(conflict),
            _ => None,
        }
    }
}

fn join_warnings(warnings: &[RouteWarning]) -> String {
    warnings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
