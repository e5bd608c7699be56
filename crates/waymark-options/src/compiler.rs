//! Preset resolution, layering, feature completion and validation in one
//! step.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::defaults::{apply_feature_defaults, route_defaults};
use crate::validate::{validate_route_options_with, TracingSink, WarningSink};
use crate::{
    merge_options, merge_with_defaults, validate_cache_config, validate_throttle_config,
    HttpMethod, OptionsError, OptionsResult, PresetRegistry, RouteOptions, RouteWarning,
};

/// How an unregistered preset name is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetPolicy {
    /// Resolve to an empty fragment and log a warning.
    #[default]
    Lenient,
    /// Fail with [`OptionsError::UnknownPreset`].
    Strict,
}

/// How validation warnings are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningPolicy {
    /// Log each warning and continue.
    #[default]
    Log,
    /// Fail with [`OptionsError::DeniedWarnings`] when any warning fires.
    Deny,
    /// Collect warnings silently.
    Ignore,
}

/// The merged, validated options of one endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRoute {
    options: RouteOptions,
    preset: Option<String>,
    warnings: Vec<RouteWarning>,
}

impl CompiledRoute {
    /// The final options.
    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    /// The preset requested for the endpoint, if any.
    pub fn preset(&self) -> Option<&str> {
        self.preset.as_deref()
    }

    /// Warnings raised during validation, in rule order.
    pub fn warnings(&self) -> &[RouteWarning] {
        &self.warnings
    }

    /// Registration verb; `GET` when unset.
    pub fn method(&self) -> HttpMethod {
        self.options.effective_method()
    }

    /// Registration path, if set.
    pub fn path(&self) -> Option<&str> {
        self.options.path.as_deref()
    }

    /// Consumes the route, returning its options.
    pub fn into_options(self) -> RouteOptions {
        self.options
    }
}

/// Compiles endpoint fragments into [`CompiledRoute`]s.
///
/// Layers are applied as defaults, then the preset fragment, then the user
/// fragment. `disableDefaults` removes only the default layer.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use waymark_options::{HttpMethod, RouteCompiler, RouteOptions};
///
/// let compiler = RouteCompiler::new();
/// let user = RouteOptions::from_json(json!({
///     "path": "/users",
///     "cache": {"key": "users-list", "ttl": 60}
/// }))?;
///
/// let route = compiler.compile(Some("crud.list"), user)?;
/// assert_eq!(route.method(), HttpMethod::Get);
/// assert_eq!(route.options().http_code, Some(200));
/// assert!(route.warnings().is_empty());
/// # Ok::<(), waymark_options::OptionsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RouteCompiler {
    presets: Cow<'static, PresetRegistry>,
    defaults: RouteOptions,
    preset_policy: PresetPolicy,
    warning_policy: WarningPolicy,
}

impl Default for RouteCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteCompiler {
    /// A compiler over the built-in presets with default policies.
    pub fn new() -> Self {
        Self::with_static_registry(PresetRegistry::builtin())
    }

    /// A compiler over a shared registry.
    pub fn with_static_registry(presets: &'static PresetRegistry) -> Self {
        Self {
            presets: Cow::Borrowed(presets),
            defaults: route_defaults(),
            preset_policy: PresetPolicy::default(),
            warning_policy: WarningPolicy::default(),
        }
    }

    /// A compiler owning `presets`.
    pub fn with_registry(presets: PresetRegistry) -> Self {
        Self {
            presets: Cow::Owned(presets),
            ..Self::new()
        }
    }

    /// Sets the unknown preset policy.
    #[must_use]
    pub fn with_preset_policy(mut self, policy: PresetPolicy) -> Self {
        self.preset_policy = policy;
        self
    }

    /// Sets the warning policy.
    #[must_use]
    pub fn with_warning_policy(mut self, policy: WarningPolicy) -> Self {
        self.warning_policy = policy;
        self
    }

    /// Replaces the default layer.
    #[must_use]
    pub fn with_defaults(mut self, defaults: RouteOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// The preset registry in use.
    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    /// The unknown preset policy.
    pub fn preset_policy(&self) -> PresetPolicy {
        self.preset_policy
    }

    /// The warning policy.
    pub fn warning_policy(&self) -> WarningPolicy {
        self.warning_policy
    }

    /// Compiles an anonymous endpoint.
    pub fn compile(&self, preset: Option<&str>, user: RouteOptions) -> OptionsResult<CompiledRoute> {
        self.compile_inner(None, preset, user)
    }

    /// Compiles an endpoint, tagging log lines with `endpoint`.
    pub fn compile_endpoint(
        &self,
        endpoint: &str,
        preset: Option<&str>,
        user: RouteOptions,
    ) -> OptionsResult<CompiledRoute> {
        self.compile_inner(Some(endpoint), preset, user)
    }

    fn compile_inner(
        &self,
        endpoint: Option<&str>,
        preset: Option<&str>,
        user: RouteOptions,
    ) -> OptionsResult<CompiledRoute> {
        let fragment = match preset {
            Some(name) => self.resolve_preset(endpoint, name)?,
            None => RouteOptions::default(),
        };

        let mut options = merge_with_defaults(self.defaults.clone(), merge_options([fragment, user]));
        let defaults_disabled = options.defaults_disabled();
        if !defaults_disabled {
            apply_feature_defaults(&mut options);
        }

        let mut warnings = Vec::new();
        let outcome = validate_route_options_with(&options, &mut warnings)
            .and_then(|()| options.cache.as_ref().map_or(Ok(()), validate_cache_config))
            .and_then(|()| {
                options
                    .throttle
                    .as_ref()
                    .map_or(Ok(()), validate_throttle_config)
            });

        if self.warning_policy == WarningPolicy::Log {
            let mut sink = endpoint.map_or_else(TracingSink::default, TracingSink::for_endpoint);
            for warning in &warnings {
                sink.warn(warning.clone());
            }
        }
        outcome?;

        if self.warning_policy == WarningPolicy::Deny && !warnings.is_empty() {
            return Err(OptionsError::DeniedWarnings { warnings });
        }

        tracing::debug!(
            endpoint = endpoint.unwrap_or("<anonymous>"),
            preset = preset.unwrap_or("<none>"),
            method = %options.effective_method(),
            defaults_disabled,
            warnings = warnings.len(),
            "Compiled route options"
        );

        Ok(CompiledRoute {
            options,
            preset: preset.map(str::to_owned),
            warnings,
        })
    }

    fn resolve_preset(&self, endpoint: Option<&str>, name: &str) -> OptionsResult<RouteOptions> {
        if let Some(fragment) = self.presets.get(name) {
            return Ok(fragment.clone());
        }
        match self.preset_policy {
            PresetPolicy::Strict => Err(OptionsError::unknown_preset(name)),
            PresetPolicy::Lenient => {
                tracing::warn!(
                    endpoint = endpoint.unwrap_or("<anonymous>"),
                    preset = name,
                    "Unknown route preset, continuing without one"
                );
                Ok(RouteOptions::default())
            }
        }
    }
}
