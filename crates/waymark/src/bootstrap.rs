//! Startup wiring from settings to a ready route table.

use waymark_config::{EndpointEntry, EndpointManifest, WaymarkConfig};
use waymark_router::RouteTable;
use waymark_telemetry::TelemetryResult;

use crate::{build_route_table, WaymarkResult};

/// Installs the subscriber described by `config.logging`.
///
/// Fails when a global subscriber is already set.
pub fn init_logging(config: &WaymarkConfig) -> TelemetryResult<()> {
    waymark_telemetry::init_logging(&config.logging.to_log_config())
}

/// Initialises logging, then builds the route table for `manifest`.
///
/// ```no_run
/// use waymark::config::{ConfigLoader, EndpointManifest};
///
/// type Handler = fn() -> &'static str;
///
/// fn list_users() -> &'static str { "[]" }
/// fn create_user() -> &'static str { "{}" }
///
/// # fn main() -> Result<(), waymark::WaymarkError> {
/// let config = ConfigLoader::new()
///     .with_production()
///     .with_optional_file("waymark.toml")?
///     .with_env_prefix("WAYMARK")
///     .load()?;
/// let manifest = EndpointManifest::from_file("routes.toml")?;
///
/// let table = waymark::bootstrap(&config, manifest, |entry| -> Option<Handler> {
///     match entry.id.as_str() {
///         "listUsers" => Some(list_users),
///         "createUser" => Some(create_user),
///         _ => None,
///     }
/// })?;
/// # let _ = table;
/// # Ok(())
/// # }
/// ```
pub fn bootstrap<H, F>(
    config: &WaymarkConfig,
    manifest: EndpointManifest,
    handler_for: F,
) -> WaymarkResult<RouteTable<H>>
where
    F: FnMut(&EndpointEntry) -> Option<H>,
{
    init_logging(config)?;
    build_route_table(config, manifest, handler_for)
}
