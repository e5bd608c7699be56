//! Static default tables.
//!
//! [`route_defaults`] is the lowest-precedence fragment of every compiled
//! route. The per-feature tables only complete blocks the endpoint already
//! declares; they never switch a feature on by themselves.

use indexmap::IndexMap;

use crate::merge::FillDefaults;
use crate::{
    Backoff, CacheOptions, CircuitBreakerOptions, CorsOptions, HttpMethod, ParamDescriptor,
    ResponseDescriptor, ResponseKind, Responses, RetryOptions, RouteOptions, TelemetryOptions,
    ThrottleOptions,
};

/// Header carrying the request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Default cache time to live, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: i64 = 300;

/// Default requests allowed per throttle window.
pub const DEFAULT_RATE_LIMIT: i64 = 100;

/// Default throttle window, in seconds.
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: i64 = 60;

/// Default CORS preflight cache duration (24 hours).
pub const DEFAULT_CORS_MAX_AGE_SECS: u64 = 86_400;

/// Media type of server-sent event streams.
pub const EVENT_STREAM: &str = "text/event-stream";

/// Media type of multipart uploads.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Request headers documented on every endpoint.
pub fn default_headers() -> Vec<ParamDescriptor> {
    vec![ParamDescriptor::new(REQUEST_ID_HEADER)
        .with_description("Correlation id propagated to logs and responses")]
}

/// Error responses documented on every non-redirect endpoint.
pub fn default_responses() -> Responses {
    IndexMap::from([
        (
            ResponseKind::BadRequest,
            ResponseDescriptor::described("Invalid request"),
        ),
        (
            ResponseKind::InternalServerError,
            ResponseDescriptor::described("Unexpected server error"),
        ),
    ])
}

/// Completion values for a declared `cache` block.
pub fn default_cache() -> CacheOptions {
    CacheOptions {
        enabled: None,
        ttl: Some(DEFAULT_CACHE_TTL_SECS),
        key: None,
    }
}

/// Completion values for a declared `throttle` block (100 requests/minute).
pub fn default_throttle() -> ThrottleOptions {
    ThrottleOptions {
        limit: Some(DEFAULT_RATE_LIMIT),
        ttl: Some(DEFAULT_RATE_LIMIT_WINDOW_SECS),
        skip: None,
    }
}

/// Completion values for a declared `retry` block.
pub fn default_retry() -> RetryOptions {
    RetryOptions {
        enabled: Some(true),
        max_attempts: Some(3),
        delay_ms: Some(1_000),
        backoff: Some(Backoff::Exponential),
    }
}

/// Completion values for a declared `circuitBreaker` block.
pub fn default_circuit_breaker() -> CircuitBreakerOptions {
    CircuitBreakerOptions {
        enabled: Some(true),
        failure_threshold: Some(5),
        reset_timeout_ms: Some(30_000),
        half_open_max_calls: Some(1),
    }
}

/// Completion values for a declared `cors` block.
pub fn default_cors() -> CorsOptions {
    CorsOptions {
        origins: vec!["*".to_string()],
        methods: vec![
            HttpMethod::Get,
            HttpMethod::Head,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Patch,
        ],
        headers: vec![
            "content-type".to_string(),
            "authorization".to_string(),
            REQUEST_ID_HEADER.to_string(),
        ],
        credentials: Some(false),
        max_age_secs: Some(DEFAULT_CORS_MAX_AGE_SECS),
    }
}

/// Base fragment merged beneath every preset and user fragment.
pub fn route_defaults() -> RouteOptions {
    RouteOptions {
        headers: default_headers(),
        telemetry: Some(TelemetryOptions {
            enabled: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Completes the feature blocks `options` declares from the tables above.
///
/// Redirect endpoints do not receive the default error responses.
pub fn apply_feature_defaults(options: &mut RouteOptions) {
    if let Some(cache) = options.cache.as_mut() {
        cache.fill_from(default_cache());
    }
    if let Some(throttle) = options.throttle.as_mut() {
        throttle.fill_from(default_throttle());
    }
    if let Some(retry) = options.retry.as_mut() {
        retry.fill_from(default_retry());
    }
    if let Some(breaker) = options.circuit_breaker.as_mut() {
        breaker.fill_from(default_circuit_breaker());
    }
    if let Some(cors) = options.cors.as_mut() {
        cors.fill_from(default_cors());
    }
    if options.redirect.is_none() {
        for (kind, descriptor) in default_responses() {
            options.responses.entry(kind).or_insert(descriptor);
        }
    }
}
