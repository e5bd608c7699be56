//! Endpoint manifests.
//!
//! A manifest lists endpoints as data so an application can declare its
//! routes in a file instead of in code:
//!
//! ```toml
//! [[endpoints]]
//! id = "listUsers"
//! preset = "crud.list"
//!
//! [endpoints.options]
//! path = "/users"
//! cache = { key = "users-list", ttl = 60 }
//!
//! [[endpoints]]
//! id = "createUser"
//! preset = "crud.create"
//! options = { path = "/users" }
//! ```
//!
//! Option keys use the same camelCase names as JSON fragments
//! (`httpCode`, `disableDefaults`, ...).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use waymark_options::RouteOptions;

use crate::format::{read_file, Format};
use crate::ConfigError;

/// One declared endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointEntry {
    /// Endpoint identifier, unique within the manifest.
    pub id: String,

    /// Preset to start from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// User options layered over the preset.
    #[serde(default)]
    pub options: RouteOptions,
}

/// A list of endpoint declarations.
///
/// # Example
///
/// ```
/// use waymark_config::EndpointManifest;
///
/// let manifest = EndpointManifest::from_string(
///     r#"{"endpoints": [{"id": "health", "options": {"path": "/health"}}]}"#,
///     "json",
/// )?;
///
/// assert_eq!(manifest.len(), 1);
/// assert_eq!(manifest.endpoints[0].options.path.as_deref(), Some("/health"));
/// # Ok::<(), waymark_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointManifest {
    /// Declarations in file order.
    #[serde(default)]
    pub endpoints: Vec<EndpointEntry>,
}

impl EndpointManifest {
    /// Reads and validates a `.toml` or `.json` manifest.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let manifest = Self::parse(format, &read_file(path)?)?;
        tracing::debug!(
            path = %path.display(),
            endpoints = manifest.len(),
            "Loaded endpoint manifest"
        );
        Ok(manifest)
    }

    /// Parses and validates a manifest held in memory. `format` is
    /// `"toml"` or `"json"`.
    pub fn from_string(content: &str, format: &str) -> Result<Self, ConfigError> {
        Self::parse(Format::from_name(format)?, content)
    }

    fn parse(format: Format, content: &str) -> Result<Self, ConfigError> {
        let manifest: Self = format.parse(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Rejects blank and repeated identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (index, entry) in self.endpoints.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    format!("endpoints[{index}].id"),
                    "must not be blank",
                ));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::invalid_value(
                    format!("endpoints[{index}].id"),
                    format!("'{}' is declared more than once", entry.id),
                ));
            }
        }
        Ok(())
    }

    /// Number of declared endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Declarations in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, EndpointEntry> {
        self.endpoints.iter()
    }
}

impl IntoIterator for EndpointManifest {
    type Item = EndpointEntry;
    type IntoIter = std::vec::IntoIter<EndpointEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.into_iter()
    }
}

impl<'a> IntoIterator for &'a EndpointManifest {
    type Item = &'a EndpointEntry;
    type IntoIter = std::slice::Iter<'a, EndpointEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}
