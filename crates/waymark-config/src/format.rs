//! Document formats shared by the settings loader and the manifest reader.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::ConfigError;

/// A supported document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl Format {
    /// Resolves a format name such as `"toml"` or `"JSON"`.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::unsupported_format(name)),
        }
    }

    /// Resolves the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_name(extension)
            .map_err(|_| ConfigError::unsupported_format(path.display().to_string()))
    }

    /// Decodes `content` as `T`.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, ConfigError> {
        match self {
            Self::Toml => Ok(toml::from_str(content)?),
            Self::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

/// Reads a file, distinguishing a missing file from other I/O failures.
pub(crate) fn read_file(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::file_not_found(path));
    }
    std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))
}
