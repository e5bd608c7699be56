//! Layered settings loader.
//!
//! This module provides the [`ConfigLoader`] for loading settings from
//! defaults, files, `.env` files and environment variables.

use std::env;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use waymark_options::merge::merge_json;

use crate::format::{read_file, Format};
use crate::{ConfigError, WaymarkConfig};

/// Settings loader with a layered approach.
///
/// Later layers override earlier ones:
/// 1. Defaults, or the development/production preset
/// 2. Files and strings (TOML or JSON), in the order they are added
/// 3. Environment variables `PREFIX__SECTION__KEY`
///
/// File layers merge key by key: a file that only sets `logging.level`
/// keeps every other value from the layers below it.
///
/// # Example
///
/// ```no_run
/// use waymark_config::ConfigLoader;
///
/// # fn main() -> Result<(), waymark_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_production()
///     .with_optional_file("waymark.toml")?
///     .with_dotenv()?
///     .with_env_prefix("WAYMARK")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: WaymarkConfig,
    env_prefix: Option<String>,
    file_loaded: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader starting from the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: WaymarkConfig::default(),
            env_prefix: None,
            file_loaded: false,
        }
    }

    /// Reset to the default settings.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = WaymarkConfig::default();
        self
    }

    /// Reset to the development preset.
    ///
    /// ```
    /// use waymark_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = WaymarkConfig::development();
        self
    }

    /// Reset to the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = WaymarkConfig::production();
        self
    }

    /// Layer a TOML (`.toml`) or JSON (`.json`) file over the current
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist or cannot be read
    /// - The extension is neither `.toml` nor `.json`
    /// - The document is malformed, names an unknown key or has a
    ///   mistyped value
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let content = read_file(path)?;

        let layer = parse_layer(format, &content)?;
        self.merge_layer(layer)?;
        self.file_loaded = true;

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Layer a document held in memory. `format` is `"toml"` or `"json"`.
    ///
    /// ```
    /// use waymark_config::ConfigLoader;
    /// use waymark_options::WarningPolicy;
    ///
    /// let toml = r#"
    ///     [compiler]
    ///     warning_policy = "deny"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.compiler.warning_policy, WarningPolicy::Deny);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        let layer = parse_layer(Format::from_name(format)?, content)?;
        self.merge_layer(layer)?;
        Ok(self)
    }

    /// Set the environment variable prefix for overrides.
    ///
    /// With prefix `WAYMARK`:
    /// - `WAYMARK__COMPILER__PRESET_POLICY=strict`
    /// - `WAYMARK__COMPILER__WARNING_POLICY=deny`
    /// - `WAYMARK__ROUTER__PREFIX=/api/v1`
    /// - `WAYMARK__LOGGING__LEVEL=debug`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load `.env` from the working directory, if present.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(ConfigError::env_parse_error(".env", e.to_string())),
        }
    }

    /// Load variables from a specific dotenv file.
    pub fn with_dotenv_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        dotenvy::from_path(path).map_err(|e| {
            if e.not_found() {
                ConfigError::file_not_found(path)
            } else {
                ConfigError::env_parse_error(path.display().to_string(), e.to_string())
            }
        })?;
        Ok(self)
    }

    /// Whether any file layer was applied.
    pub fn file_loaded(&self) -> bool {
        self.file_loaded
    }

    /// Apply environment overrides and validate.
    pub fn load(mut self) -> Result<WaymarkConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Return the settings without environment overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> WaymarkConfig {
        self.config
    }

    fn merge_layer(&mut self, layer: Value) -> Result<(), ConfigError> {
        let mut merged = serde_json::to_value(&self.config)?;
        merge_json(&mut merged, layer);
        self.config = serde_json::from_value(merged)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        let mut vars: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with(&marker))
            .collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let key_without_prefix = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            ["COMPILER", "PRESET_POLICY"] => {
                self.config.compiler.preset_policy =
                    parse_variant(key, value, "expected 'lenient' or 'strict'")?;
            }
            ["COMPILER", "WARNING_POLICY"] => {
                self.config.compiler.warning_policy =
                    parse_variant(key, value, "expected 'log', 'deny' or 'ignore'")?;
            }

            ["ROUTER", "PREFIX"] => {
                self.config.router.prefix = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }

            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format =
                    parse_variant(key, value, "expected 'json', 'pretty' or 'compact'")?;
            }
            ["LOGGING", "ANSI_ENABLED"] => {
                self.config.logging.ansi_enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "INCLUDE_LOCATION"] => {
                self.config.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            _ => {
                tracing::debug!(var = key, "Ignoring unknown configuration variable");
            }
        }

        Ok(())
    }
}

// Typed pass first so unknown keys are reported in the document's own format.
fn parse_layer(format: Format, content: &str) -> Result<Value, ConfigError> {
    format.parse::<WaymarkConfig>(content)?;
    format.parse::<Value>(content)
}

fn parse_variant<T: DeserializeOwned>(
    key: &str,
    value: &str,
    expected: &str,
) -> Result<T, ConfigError> {
    serde_json::from_value(Value::String(value.to_lowercase()))
        .map_err(|_| ConfigError::env_parse_error(key, expected))
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
