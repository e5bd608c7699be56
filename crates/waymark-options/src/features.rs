//! Nested feature blocks of [`RouteOptions`](crate::RouteOptions).
//!
//! Each block merges field by field, and the resilience/caching blocks can
//! be completed from the static tables in [`defaults`](crate::defaults).

use serde::{Deserialize, Serialize};

use crate::merge::{merge_fields, FillDefaults, Merge};
use crate::HttpMethod;

/// Response caching.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CacheOptions {
    /// Whether caching is switched on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Time to live in seconds; must be positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,

    /// Cache key; derived from the request when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Merge for CacheOptions {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            replace: [enabled, ttl, key],
        });
    }
}

impl FillDefaults for CacheOptions {
    fn fill_from(&mut self, defaults: Self) {
        merge_fields!(self, defaults, {
            fill: [enabled, ttl, key],
        });
    }
}

/// Rate limiting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThrottleOptions {
    /// Requests allowed per window; must be positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Window length in seconds; must be positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,

    /// Exempts the endpoint from a global limiter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<bool>,
}

impl Merge for ThrottleOptions {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            replace: [limit, ttl, skip],
        });
    }
}

impl FillDefaults for ThrottleOptions {
    fn fill_from(&mut self, defaults: Self) {
        merge_fields!(self, defaults, {
            fill: [limit, ttl, skip],
        });
    }
}

/// Circuit breaker around the handler.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CircuitBreakerOptions {
    /// Whether the breaker is armed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Consecutive failures before opening.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<u32>,

    /// Time in the open state before probing, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_timeout_ms: Option<u64>,

    /// Probe calls allowed while half-open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_open_max_calls: Option<u32>,
}

impl Merge for CircuitBreakerOptions {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            replace: [enabled, failure_threshold, reset_timeout_ms, half_open_max_calls],
        });
    }
}

impl FillDefaults for CircuitBreakerOptions {
    fn fill_from(&mut self, defaults: Self) {
        merge_fields!(self, defaults, {
            fill: [enabled, failure_threshold, reset_timeout_ms, half_open_max_calls],
        });
    }
}

/// Delay growth between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    /// Same delay every attempt.
    Fixed,
    /// Delay grows by `delay_ms` each attempt.
    Linear,
    /// Delay doubles each attempt.
    Exponential,
}

/// Retry of failed handler invocations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RetryOptions {
    /// Whether retries happen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Total attempts including the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,

    /// Base delay in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,

    /// Delay growth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff: Option<Backoff>,
}

impl Merge for RetryOptions {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            replace: [enabled, max_attempts, delay_ms, backoff],
        });
    }
}

impl FillDefaults for RetryOptions {
    fn fill_from(&mut self, defaults: Self) {
        merge_fields!(self, defaults, {
            fill: [enabled, max_attempts, delay_ms, backoff],
        });
    }
}

/// Access requirements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecurityOptions {
    /// Skips authentication entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    /// Roles of which the caller needs at least one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    /// OAuth scopes the caller needs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,

    /// Documented authentication schemes (e.g. `bearer`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
}

impl Merge for SecurityOptions {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            replace: [public],
            concat: [roles, scopes, schemes],
        });
    }
}

/// Per-endpoint observability switches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TelemetryOptions {
    /// Whether spans and logs are produced for the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Span name; defaults to `METHOD path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_name: Option<String>,

    /// Log the incoming request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_request: Option<bool>,

    /// Log the outgoing response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_response: Option<bool>,
}

impl Merge for TelemetryOptions {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            replace: [enabled, span_name, log_request, log_response],
        });
    }
}

/// Cross-origin resource sharing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CorsOptions {
    /// Allowed origins; `*` allows any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<String>,

    /// Allowed methods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<HttpMethod>,

    /// Allowed request headers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,

    /// Whether credentials may be sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<bool>,

    /// Preflight cache duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_secs: Option<u64>,
}

impl Merge for CorsOptions {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            concat: [origins, methods, headers],
            replace: [credentials, max_age_secs],
        });
    }
}

impl FillDefaults for CorsOptions {
    fn fill_from(&mut self, defaults: Self) {
        merge_fields!(self, defaults, {
            fill_vec: [origins, methods, headers],
            fill: [credentials, max_age_secs],
        });
    }
}
