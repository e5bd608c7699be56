//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading settings or endpoint manifests.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// File could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error, also raised for unknown fields and mistyped
    /// values.
    #[error("failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File or string in a format other than TOML or JSON.
    #[error("unsupported configuration format: {format}")]
    UnsupportedFormat {
        /// Extension or format name as given.
        format: String,
    },

    /// Invalid configuration value.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field path.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Environment variable could not be applied.
    #[error("failed to parse environment variable {var}: {reason}")]
    EnvParseError {
        /// The environment variable name.
        var: String,
        /// Why it could not be applied.
        reason: String,
    },
}

impl ConfigError {
    /// Create a new file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a new unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a new invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new environment variable parse error.
    pub fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error() {
        let err = ConfigError::file_not_found("/path/to/waymark.toml");
        assert!(err.to_string().contains("/path/to/waymark.toml"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::invalid_value("logging.level", "unknown level 'loud'");
        assert!(err.to_string().contains("logging.level"));
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_env_parse_error() {
        let err = ConfigError::env_parse_error("WAYMARK__LOGGING__ENABLED", "expected boolean");
        assert!(err.to_string().contains("WAYMARK__LOGGING__ENABLED"));
        assert!(err.to_string().contains("expected boolean"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = ConfigError::unsupported_format("yaml");
        assert_eq!(err.to_string(), "unsupported configuration format: yaml");
    }
}
