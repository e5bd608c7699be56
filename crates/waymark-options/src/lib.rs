//! Declarative route options for Waymark.
//!
//! This crate turns a preset name plus a partial, user-authored
//! [`RouteOptions`] fragment into one merged and validated configuration
//! per endpoint. It is used once per endpoint at startup.
//!
//! # Features
//!
//! - **Preset Registry**: named fragments such as `crud.list` or `stream.sse`
//! - **Layered Merging**: typed per-field strategies (replace, concatenate, deep merge)
//! - **Defaults**: static header/response/CORS/rate-limit/retry/circuit-breaker/cache tables
//! - **Validation**: structured conflict errors and non-fatal warnings
//!
//! # Example
//!
//! ```rust
//! use waymark_options::{
//!     merge_options, validate_route_options, CacheOptions, HttpMethod, PresetRegistry,
//!     RouteOptions,
//! };
//!
//! let preset = PresetRegistry::builtin().apply_preset("crud.list");
//! let user = RouteOptions {
//!     path: Some("/users".into()),
//!     cache: Some(CacheOptions {
//!         key: Some("users-list".into()),
//!         ttl: Some(60),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let merged = merge_options([preset, user]);
//! validate_route_options(&merged)?;
//!
//! assert_eq!(merged.method, Some(HttpMethod::Get));
//! assert_eq!(merged.http_code, Some(200));
//! # Ok::<(), waymark_options::OptionsError>(())
//! ```
//!
//! Most callers go through [`RouteCompiler`], which adds the default layer,
//! completes declared feature blocks and applies the preset and warning
//! policies.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod compiler;
pub mod defaults;
mod descriptors;
mod error;
mod features;
pub mod merge;
mod options;
mod presets;
mod validate;

pub use compiler::{CompiledRoute, PresetPolicy, RouteCompiler, WarningPolicy};
pub use descriptors::{
    BodyOptions, HttpMethod, MiddlewareRef, ParamDescriptor, ParamType, RedirectOptions,
    ResponseDescriptor, ResponseKind, Responses, UploadOptions,
};
pub use error::{ConflictError, OptionsError, OptionsResult};
pub use features::{
    Backoff, CacheOptions, CircuitBreakerOptions, CorsOptions, RetryOptions, SecurityOptions,
    TelemetryOptions, ThrottleOptions,
};
pub use merge::{merge_options, merge_with_defaults, FillDefaults, Merge};
pub use options::RouteOptions;
pub use presets::{PresetRegistry, PresetRegistryBuilder};
pub use validate::{
    validate_cache_config, validate_route_options, validate_route_options_with,
    validate_throttle_config, RouteWarning, TracingSink, UploadField, WarningSink,
};
