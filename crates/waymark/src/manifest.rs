//! Registering a whole manifest at once.

use waymark_config::{EndpointEntry, EndpointManifest, WaymarkConfig};
use waymark_router::{EndpointDef, RouteTable, RouterResult};
use waymark_telemetry::{log_endpoint_registered, log_endpoint_rejected};

use crate::{EndpointFailure, ManifestError};

/// A route table with the compiler policies and prefix from `config`.
///
/// ```
/// use waymark::config::{RouterConfig, WaymarkConfig};
///
/// let config = WaymarkConfig::builder()
///     .router(RouterConfig { prefix: Some("/api".into()) })
///     .build();
/// let table = waymark::table_from_config::<()>(&config)?;
/// assert!(table.is_empty());
/// # Ok::<(), waymark::router::RouterError>(())
/// ```
pub fn table_from_config<H>(config: &WaymarkConfig) -> RouterResult<RouteTable<H>> {
    let table = RouteTable::with_compiler(config.route_compiler());
    match &config.router.prefix {
        Some(prefix) => table.with_prefix(prefix),
        None => Ok(table),
    }
}

/// Registers every manifest entry, binding each to `handler_for(entry)`.
///
/// Every entry is attempted. Entries that fail are skipped and reported
/// together; entries that succeed stay registered.
pub fn register_manifest<H, F>(
    table: &mut RouteTable<H>,
    manifest: EndpointManifest,
    mut handler_for: F,
) -> Result<(), ManifestError>
where
    F: FnMut(&EndpointEntry) -> Option<H>,
{
    let total = manifest.len();
    let mut failures = Vec::new();

    for entry in manifest {
        let Some(handler) = handler_for(&entry) else {
            let failure = EndpointFailure::MissingHandler { endpoint: entry.id };
            log_endpoint_rejected!(failure.endpoint(), failure);
            failures.push(failure);
            continue;
        };

        let EndpointEntry {
            id,
            preset,
            options,
        } = entry;
        let mut def = EndpointDef::new(id).with_options(options);
        if let Some(preset) = preset {
            def = def.with_preset(preset);
        }

        match table.register(def, handler) {
            Ok(endpoint) => {
                log_endpoint_registered!(endpoint.id(), endpoint.method(), endpoint.path());
            }
            Err(err) => {
                log_endpoint_rejected!(err.endpoint(), err);
                failures.push(err.into());
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ManifestError::new(failures, total))
    }
}

/// Builds a fresh table from `config` and registers `manifest` into it.
///
/// Nothing is returned unless every entry registers.
pub fn build_route_table<H, F>(
    config: &WaymarkConfig,
    manifest: EndpointManifest,
    handler_for: F,
) -> crate::WaymarkResult<RouteTable<H>>
where
    F: FnMut(&EndpointEntry) -> Option<H>,
{
    let mut table = table_from_config(config)?;
    register_manifest(&mut table, manifest, handler_for)?;
    tracing::debug!(endpoints = table.len(), "Route table ready");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_options::HttpMethod;

    fn manifest(json: &str) -> EndpointManifest {
        EndpointManifest::from_string(json, "json").unwrap()
    }

    #[test]
    fn test_register_manifest_binds_handlers() {
        let mut table = RouteTable::new();
        let manifest = manifest(
            r#"{"endpoints": [
                {"id": "listUsers", "preset": "crud.list", "options": {"path": "/users"}},
                {"id": "createUser", "preset": "crud.create", "options": {"path": "/users"}}
            ]}"#,
        );

        register_manifest(&mut table, manifest, |entry| Some(entry.id.len())).unwrap();

        assert_eq!(table.len(), 2);
        let created = table.find(HttpMethod::Post, "/users").unwrap();
        assert_eq!(created.endpoint.id(), "createUser");
        assert_eq!(*created.endpoint.handler(), "createUser".len());
    }

    #[test]
    fn test_failures_are_collected_and_successes_kept() {
        let mut table = RouteTable::new();
        let manifest = manifest(
            r#"{"endpoints": [
                {"id": "stream", "preset": "crud.create", "options": {"path": "/s", "sse": true, "body": {}}},
                {"id": "health", "options": {"path": "/health"}},
                {"id": "orphan", "options": {"path": "/orphan"}}
            ]}"#,
        );

        let err = register_manifest(&mut table, manifest, |entry| {
            (entry.id != "orphan").then_some(())
        })
        .unwrap_err();

        assert_eq!(err.total(), 3);
        assert_eq!(err.endpoints().collect::<Vec<_>>(), ["stream", "orphan"]);
        assert_eq!(table.len(), 1);
        assert!(table.get("health").is_some());
    }

    #[test]
    fn test_table_from_config_rejects_bad_prefix() {
        let config = WaymarkConfig::builder()
            .router(waymark_config::RouterConfig {
                prefix: Some("/api/{version".to_string()),
            })
            .build();
        assert!(table_from_config::<()>(&config).is_err());
    }
}
