//! The [`RouteOptions`] fragment type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::merge::{merge_fields, Merge};
use crate::{
    BodyOptions, CacheOptions, CircuitBreakerOptions, CorsOptions, HttpMethod, MiddlewareRef,
    OptionsResult, ParamDescriptor, RedirectOptions, Responses, RetryOptions, SecurityOptions,
    TelemetryOptions, ThrottleOptions, UploadOptions,
};

/// Declarative configuration of one endpoint.
///
/// Every field is optional so the same type describes defaults, preset
/// fragments, user overrides and the merged result. Field names serialize
/// in camelCase, which lets fragments be written as JSON or TOML literals.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use waymark_options::{HttpMethod, RouteOptions};
///
/// let options = RouteOptions::from_json(json!({
///     "method": "GET",
///     "path": "/users",
///     "cache": {"key": "users-list", "ttl": 60}
/// }))?;
///
/// assert_eq!(options.method, Some(HttpMethod::Get));
/// assert_eq!(options.cache.unwrap().ttl, Some(60));
/// # Ok::<(), waymark_options::OptionsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RouteOptions {
    /// HTTP verb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,

    /// Path template, e.g. `/users/{id}` or `/users/:id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Success status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_code: Option<u16>,

    /// One-line summary for API docs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Long description for API docs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Stable operation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    /// Marks the endpoint deprecated in API docs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// API doc tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Path parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDescriptor>,

    /// Query parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<ParamDescriptor>,

    /// Request headers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<ParamDescriptor>,

    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyOptions>,

    /// Documented responses.
    #[serde(default, skip_serializing_if = "Responses::is_empty")]
    pub responses: Responses,

    /// Response media types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    /// Request media types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    /// Server-sent events response mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sse: Option<bool>,

    /// Redirect response mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RedirectOptions>,

    /// Rendered-template response mode; names the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<String>,

    /// Single file upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<UploadOptions>,

    /// Multiple file upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<UploadOptions>,

    /// Response caching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheOptions>,

    /// Rate limiting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttle: Option<ThrottleOptions>,

    /// Circuit breaker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_breaker: Option<CircuitBreakerOptions>,

    /// Retry policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryOptions>,

    /// Access requirements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityOptions>,

    /// Observability switches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<TelemetryOptions>,

    /// Cross-origin resource sharing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsOptions>,

    /// Handler timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Guards run before the handler.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guards: Vec<MiddlewareRef>,

    /// Pipes applied to inputs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pipes: Vec<MiddlewareRef>,

    /// Interceptors wrapped around the handler.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interceptors: Vec<MiddlewareRef>,

    /// Exception filters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<MiddlewareRef>,

    /// Free-form vendor extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,

    /// Skips every default layer when `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_defaults: Option<bool>,
}

impl RouteOptions {
    /// Decodes a fragment from a JSON literal.
    pub fn from_json(value: Value) -> OptionsResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Encodes the fragment as JSON, omitting unset fields.
    pub fn to_json(&self) -> OptionsResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Whether the fragment opts out of defaults.
    pub fn defaults_disabled(&self) -> bool {
        self.disable_defaults == Some(true)
    }

    /// Whether the endpoint streams server-sent events.
    pub fn is_sse(&self) -> bool {
        self.sse == Some(true)
    }

    /// Whether any upload mode is configured.
    pub fn has_upload(&self) -> bool {
        self.file.is_some() || self.files.is_some()
    }

    /// Verb used for registration; `GET` when unset.
    pub fn effective_method(&self) -> HttpMethod {
        self.method.unwrap_or(HttpMethod::Get)
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Merge for RouteOptions {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            replace: [
                method,
                path,
                http_code,
                summary,
                description,
                operation_id,
                deprecated,
                sse,
                render,
                timeout_ms,
                disable_defaults,
            ],
            concat: [
                tags,
                params,
                queries,
                headers,
                produces,
                consumes,
                guards,
                pipes,
                interceptors,
                filters,
            ],
            deep: [
                body,
                redirect,
                file,
                files,
                cache,
                throttle,
                circuit_breaker,
                retry,
                security,
                telemetry,
                cors,
            ],
            entries: [responses],
            json: [extensions],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{merge_options, ResponseDescriptor, ResponseKind};
    use serde_json::json;

    #[test]
    fn test_from_json_camel_case_fields() {
        let options = RouteOptions::from_json(json!({
            "httpCode": 201,
            "circuitBreaker": {"failureThreshold": 3},
            "disableDefaults": true
        }))
        .unwrap();

        assert_eq!(options.http_code, Some(201));
        assert_eq!(
            options.circuit_breaker.as_ref().unwrap().failure_threshold,
            Some(3)
        );
        assert!(options.defaults_disabled());
    }

    #[test]
    fn test_from_json_rejects_unknown_option() {
        let result = RouteOptions::from_json(json!({"methd": "GET"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_rejects_non_string_cache_key() {
        let result = RouteOptions::from_json(json!({"cache": {"key": 42}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_to_json_omits_unset_fields() {
        let options = RouteOptions {
            http_code: Some(204),
            ..Default::default()
        };
        assert_eq!(options.to_json().unwrap(), json!({"httpCode": 204}));
    }

    #[test]
    fn test_array_fields_concatenate() {
        let merged = merge_options([
            RouteOptions {
                headers: vec![ParamDescriptor::new("x-a")],
                guards: vec!["AuthGuard".into()],
                ..Default::default()
            },
            RouteOptions {
                headers: vec![ParamDescriptor::new("x-b")],
                guards: vec!["AuthGuard".into()],
                ..Default::default()
            },
        ]);

        let names: Vec<_> = merged.headers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["x-a", "x-b"]);
        assert_eq!(merged.guards.len(), 2);
    }

    #[test]
    fn test_responses_merge_per_kind() {
        let mut base = RouteOptions::default();
        base.responses
            .insert(ResponseKind::Ok, ResponseDescriptor::described("Success"));
        let mut user = RouteOptions::default();
        user.responses.insert(
            ResponseKind::Ok,
            ResponseDescriptor {
                type_ref: Some("UserDto".into()),
                ..Default::default()
            },
        );
        user.responses
            .insert(ResponseKind::NotFound, ResponseDescriptor::described("Missing"));

        let merged = base.merged(user);
        let ok = &merged.responses[&ResponseKind::Ok];
        assert_eq!(ok.description.as_deref(), Some("Success"));
        assert_eq!(ok.type_ref.as_deref(), Some("UserDto"));
        assert!(merged.responses.contains_key(&ResponseKind::NotFound));
    }

    #[test]
    fn test_extensions_merge_as_json() {
        let merged = merge_options([
            RouteOptions {
                extensions: Some(json!({"x-owner": "team-a", "x-flags": ["beta"]})),
                ..Default::default()
            },
            RouteOptions {
                extensions: Some(json!({"x-flags": ["internal"]})),
                ..Default::default()
            },
        ]);

        assert_eq!(
            merged.extensions,
            Some(json!({"x-owner": "team-a", "x-flags": ["beta", "internal"]}))
        );
    }

    #[test]
    fn test_effective_method_defaults_to_get() {
        assert_eq!(RouteOptions::default().effective_method(), HttpMethod::Get);
        let post = RouteOptions {
            method: Some(HttpMethod::Post),
            ..Default::default()
        };
        assert_eq!(post.effective_method(), HttpMethod::Post);
    }

    #[test]
    fn test_is_empty() {
        assert!(RouteOptions::default().is_empty());
        assert!(!RouteOptions {
            sse: Some(false),
            ..Default::default()
        }
        .is_empty());
    }
}
