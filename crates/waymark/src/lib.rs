//! # Waymark
//!
//! **Declarative route options, compiled once at startup.**
//!
//! Endpoints are described by small option fragments. Waymark layers each
//! fragment over a named preset and the static defaults, checks the result
//! for contradictions and binds the endpoint into a route table:
//!
//! - **Presets** – `crud.list`, `crud.create`, `auth.protected`, `stream.sse`, ...
//! - **Typed Merging** – arrays concatenate, objects deep-merge, scalars replace
//! - **Validation** – hard conflicts fail, soft inconsistencies warn
//! - **Explicit Registration** – endpoints are values, not annotations
//!
//! ## Quick Start
//!
//! ```rust
//! use waymark::prelude::*;
//! use serde_json::json;
//!
//! let mut table = RouteTable::new();
//! table.register(
//!     EndpointDef::new("listUsers")
//!         .with_preset("crud.list")
//!         .with_options(RouteOptions::from_json(json!({
//!             "path": "/users",
//!             "cache": {"key": "users-list", "ttl": 60}
//!         }))?),
//!     "list_users",
//! )?;
//!
//! let found = table.find(HttpMethod::Get, "/users").unwrap();
//! assert_eq!(found.endpoint.route().options().http_code, Some(200));
//! assert!(found.endpoint.route().warnings().is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Compilation
//!
//! ```text
//! defaults ─┐
//!           ├─ merge ─ feature defaults ─ validate ─ warning policy ─ CompiledRoute
//! preset ───┤
//! user ─────┘
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bootstrap;
mod error;
mod manifest;

// Re-export option model, merger and validator
pub use waymark_options as options;

// Re-export registration types
pub use waymark_router as router;

// Re-export settings and manifests
pub use waymark_config as config;

// Re-export logging setup
pub use waymark_telemetry as telemetry;

pub use bootstrap::{bootstrap, init_logging};
pub use error::{EndpointFailure, ManifestError, WaymarkError, WaymarkResult};
pub use manifest::{build_route_table, register_manifest, table_from_config};

/// Prelude module for convenient imports.
///
/// ```rust
/// use waymark::prelude::*;
/// ```
pub mod prelude {
    pub use waymark_options::{
        merge_options, merge_with_defaults, validate_cache_config, validate_route_options,
        validate_throttle_config, CompiledRoute, HttpMethod, OptionsError, OptionsResult,
        PresetPolicy, PresetRegistry, RouteCompiler, RouteOptions, RouteWarning, WarningPolicy,
    };

    pub use waymark_router::{EndpointDef, Params, RouteMatch, RouteTable, RouterError};

    pub use waymark_config::{ConfigLoader, EndpointEntry, EndpointManifest, WaymarkConfig};

    pub use crate::{bootstrap, build_route_table, register_manifest, WaymarkError};
}
