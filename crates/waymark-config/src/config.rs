//! Top-level settings.
//!
//! This module provides [`WaymarkConfig`] and its builder.

use serde::{Deserialize, Serialize};
use waymark_options::{PresetPolicy, RouteCompiler, WarningPolicy};
use waymark_telemetry::LogFormat;

use crate::{CompilerConfig, ConfigError, LoggingConfig, RouterConfig};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Complete Waymark settings.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to layer files and
/// environment variables over the defaults.
///
/// # Example
///
/// ```
/// use waymark_config::WaymarkConfig;
/// use waymark_options::PresetPolicy;
///
/// let config = WaymarkConfig::default();
/// assert_eq!(config.compiler.preset_policy, PresetPolicy::Lenient);
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct WaymarkConfig {
    /// Route compiler settings.
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Route table settings.
    #[serde(default)]
    pub router: RouterConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WaymarkConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use waymark_config::{CompilerConfig, WaymarkConfig};
    /// use waymark_options::WarningPolicy;
    ///
    /// let config = WaymarkConfig::builder()
    ///     .compiler(CompilerConfig {
    ///         warning_policy: WarningPolicy::Deny,
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert_eq!(config.compiler.warning_policy, WarningPolicy::Deny);
    /// ```
    #[must_use]
    pub fn builder() -> WaymarkConfigBuilder {
        WaymarkConfigBuilder::new()
    }

    /// Checks values serde cannot.
    ///
    /// Returns `ConfigError::InvalidValue` when:
    /// - `logging.level` is not one of trace, debug, info, warn, error, off
    /// - `router.prefix` does not start with `/`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!(
                    "unknown level '{}', expected one of {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }

        if let Some(prefix) = &self.router.prefix {
            if !prefix.starts_with('/') {
                return Err(ConfigError::invalid_value(
                    "router.prefix",
                    format!("'{prefix}' must start with '/'"),
                ));
            }
        }

        Ok(())
    }

    /// Development preset.
    ///
    /// - Pretty, colored debug logs with source locations
    /// - Unknown presets are errors so typos surface immediately
    ///
    /// ```
    /// use waymark_config::WaymarkConfig;
    /// use waymark_options::PresetPolicy;
    ///
    /// let config = WaymarkConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// assert_eq!(config.compiler.preset_policy, PresetPolicy::Strict);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.ansi_enabled = true;
        config.logging.include_location = true;

        config.compiler.preset_policy = PresetPolicy::Strict;

        config
    }

    /// Production preset.
    ///
    /// - JSON logs at info level
    /// - Lenient presets, warnings logged
    ///
    /// ```
    /// use waymark_config::WaymarkConfig;
    /// use waymark_telemetry::LogFormat;
    ///
    /// let config = WaymarkConfig::production();
    /// assert_eq!(config.logging.format, LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.logging.ansi_enabled = false;

        config.compiler.preset_policy = PresetPolicy::Lenient;
        config.compiler.warning_policy = WarningPolicy::Log;

        config
    }

    /// A compiler with the built-in presets and these policies.
    pub fn route_compiler(&self) -> RouteCompiler {
        RouteCompiler::new()
            .with_preset_policy(self.compiler.preset_policy)
            .with_warning_policy(self.compiler.warning_policy)
    }
}

/// Builder for [`WaymarkConfig`].
#[derive(Debug, Default)]
pub struct WaymarkConfigBuilder {
    compiler: Option<CompilerConfig>,
    router: Option<RouterConfig>,
    logging: Option<LoggingConfig>,
}

impl WaymarkConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compiler section.
    #[must_use]
    pub fn compiler(mut self, compiler: CompilerConfig) -> Self {
        self.compiler = Some(compiler);
        self
    }

    /// Set the router section.
    #[must_use]
    pub fn router(mut self, router: RouterConfig) -> Self {
        self.router = Some(router);
        self
    }

    /// Set the logging section.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Build the configuration. Unset sections use their defaults.
    #[must_use]
    pub fn build(self) -> WaymarkConfig {
        WaymarkConfig {
            compiler: self.compiler.unwrap_or_default(),
            router: self.router.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    pub fn build_validated(self) -> Result<WaymarkConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
