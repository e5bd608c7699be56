//! Configuration schema types.
//!
//! Every section rejects unknown keys and fills missing keys from its
//! defaults, so a file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use waymark_options::{PresetPolicy, WarningPolicy};
use waymark_telemetry::{LogConfig, LogFormat};

/// Route compiler settings.
///
/// # Example
///
/// ```
/// use waymark_config::CompilerConfig;
/// use waymark_options::{PresetPolicy, WarningPolicy};
///
/// let config: CompilerConfig = toml::from_str(r#"preset_policy = "strict""#).unwrap();
/// assert_eq!(config.preset_policy, PresetPolicy::Strict);
/// assert_eq!(config.warning_policy, WarningPolicy::Log);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Handling of unregistered preset names.
    #[serde(default)]
    pub preset_policy: PresetPolicy,

    /// Handling of validation warnings.
    #[serde(default)]
    pub warning_policy: WarningPolicy,
}

/// Route table settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Path prefix every endpoint is mounted under (e.g. "/api/v1").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level (trace, debug, info, warn, error, off).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// The subscriber settings this section describes.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            ansi: self.ansi_enabled,
            span_events: false,
            file_line_info: self.include_location,
            include_target: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_config_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.preset_policy, PresetPolicy::Lenient);
        assert_eq!(config.warning_policy, WarningPolicy::Log);
    }

    #[test]
    fn test_compiler_config_deserialize() {
        let config: CompilerConfig =
            serde_json::from_str(r#"{"warning_policy": "deny"}"#).unwrap();
        assert_eq!(config.warning_policy, WarningPolicy::Deny);
        assert_eq!(config.preset_policy, PresetPolicy::Lenient);
    }

    #[test]
    fn test_compiler_config_rejects_unknown_fields() {
        let result: Result<CompilerConfig, _> =
            serde_json::from_str(r#"{"preset_policy": "strict", "presets": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_router_config_prefix() {
        let config: RouterConfig = toml::from_str(r#"prefix = "/api/v1""#).unwrap();
        assert_eq!(config.prefix.as_deref(), Some("/api/v1"));
        assert_eq!(RouterConfig::default().prefix, None);
    }

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_logging_config_to_log_config() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Compact,
            ansi_enabled: true,
            include_location: true,
            ..Default::default()
        };
        let log = config.to_log_config();
        assert_eq!(log.level, "debug");
        assert_eq!(log.format, LogFormat::Compact);
        assert!(log.ansi);
        assert!(log.file_line_info);
        assert!(!log.span_events);
    }
}
