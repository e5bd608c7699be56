//! Typed settings and endpoint manifests for Waymark.
//!
//! - [`WaymarkConfig`]: compiler policies, route table prefix and logging
//! - [`ConfigLoader`]: layered loading (defaults → files → env)
//! - [`EndpointManifest`]: endpoints declared in a TOML or JSON file
//!
//! Unknown keys are rejected in every section.
//!
//! # Example
//!
//! ```no_run
//! use waymark_config::{ConfigLoader, EndpointManifest};
//!
//! # fn main() -> Result<(), waymark_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_production()
//!     .with_optional_file("waymark.toml")?
//!     .with_env_prefix("WAYMARK")
//!     .load()?;
//! let manifest = EndpointManifest::from_file("routes.toml")?;
//!
//! println!("{} endpoints under {:?}", manifest.len(), config.router.prefix);
//! # Ok(())
//! # }
//! ```
//!
//! # Settings File Format
//!
//! ```toml
//! [compiler]
//! preset_policy = "strict"    # or "lenient"
//! warning_policy = "deny"     # or "log", "ignore"
//!
//! [router]
//! prefix = "/api/v1"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"             # or "pretty", "compact"
//! ansi_enabled = false
//! include_location = false
//! ```
//!
//! # Environment Variable Overrides
//!
//! Format `PREFIX__SECTION__KEY`, e.g. `WAYMARK__COMPILER__WARNING_POLICY=deny`
//! or `WAYMARK__LOGGING__LEVEL=debug`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod format;
mod loader;
mod manifest;
mod schema;

pub use config::{WaymarkConfig, WaymarkConfigBuilder};
pub use error::ConfigError;
pub use format::Format;
pub use loader::ConfigLoader;
pub use manifest::{EndpointEntry, EndpointManifest};
pub use schema::{CompilerConfig, LoggingConfig, RouterConfig};

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
