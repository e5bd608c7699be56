//! Named preset fragments.
//!
//! A [`PresetRegistry`] maps identifiers such as `crud.list` to partial
//! [`RouteOptions`]. Registries are assembled once through
//! [`PresetRegistryBuilder`] and are read-only afterwards; the built-in
//! table is shared process-wide through [`PresetRegistry::builtin`].
//!
//! # Example
//!
//! ```
//! use waymark_options::{HttpMethod, PresetRegistry};
//!
//! let presets = PresetRegistry::builtin();
//! assert!(presets.has_preset("crud.list"));
//!
//! let fragment = presets.apply_preset("crud.list");
//! assert_eq!(fragment.method, Some(HttpMethod::Get));
//! assert_eq!(fragment.http_code, Some(200));
//!
//! // Unknown names resolve to an empty fragment.
//! assert!(presets.apply_preset("nonexistent").is_empty());
//! ```

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::defaults::{EVENT_STREAM, MULTIPART_FORM_DATA};
use crate::{
    HttpMethod, ResponseDescriptor, ResponseKind, RouteOptions, SecurityOptions,
    TelemetryOptions, ThrottleOptions, UploadOptions,
};

static BUILTIN: OnceLock<PresetRegistry> = OnceLock::new();

/// Read-only table of preset fragments.
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: IndexMap<String, RouteOptions>,
}

impl PresetRegistry {
    /// Starts an empty registry builder.
    pub fn builder() -> PresetRegistryBuilder {
        PresetRegistryBuilder::default()
    }

    /// A registry with no presets.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in presets, initialised on first use.
    pub fn builtin() -> &'static PresetRegistry {
        BUILTIN.get_or_init(|| builtin_presets().build())
    }

    /// Returns a copy of the named fragment, or an empty fragment when the
    /// name is not registered.
    pub fn apply_preset(&self, name: &str) -> RouteOptions {
        self.get(name).cloned().unwrap_or_default()
    }

    /// Borrows the named fragment.
    pub fn get(&self, name: &str) -> Option<&RouteOptions> {
        self.presets.get(name)
    }

    /// Whether `name` is registered.
    pub fn has_preset(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn list_presets(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    /// Number of registered presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the registry holds no presets.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Builder for [`PresetRegistry`].
#[derive(Debug, Default)]
pub struct PresetRegistryBuilder {
    presets: IndexMap<String, RouteOptions>,
}

impl PresetRegistryBuilder {
    /// Starts from the built-in presets.
    pub fn with_builtins() -> Self {
        builtin_presets()
    }

    /// Registers `fragment` under `name`, replacing any earlier fragment
    /// with the same name.
    #[must_use]
    pub fn preset(mut self, name: impl Into<String>, fragment: RouteOptions) -> Self {
        self.presets.insert(name.into(), fragment);
        self
    }

    /// Freezes the registry.
    pub fn build(self) -> PresetRegistry {
        PresetRegistry {
            presets: self.presets,
        }
    }
}

fn responses<const N: usize>(
    entries: [(ResponseKind, &str); N],
) -> IndexMap<ResponseKind, ResponseDescriptor> {
    entries
        .into_iter()
        .map(|(kind, text)| (kind, ResponseDescriptor::described(text)))
        .collect()
}

fn verb(method: HttpMethod, http_code: u16) -> RouteOptions {
    RouteOptions {
        method: Some(method),
        http_code: Some(http_code),
        ..Default::default()
    }
}

fn builtin_presets() -> PresetRegistryBuilder {
    PresetRegistryBuilder::default()
        .preset(
            "crud.list",
            RouteOptions {
                responses: responses([(ResponseKind::Ok, "List of resources")]),
                ..verb(HttpMethod::Get, 200)
            },
        )
        .preset(
            "crud.get",
            RouteOptions {
                responses: responses([
                    (ResponseKind::Ok, "Resource found"),
                    (ResponseKind::NotFound, "Resource not found"),
                ]),
                ..verb(HttpMethod::Get, 200)
            },
        )
        .preset(
            "crud.create",
            RouteOptions {
                responses: responses([
                    (ResponseKind::Created, "Resource created"),
                    (ResponseKind::Conflict, "Resource already exists"),
                ]),
                ..verb(HttpMethod::Post, 201)
            },
        )
        .preset(
            "crud.update",
            RouteOptions {
                responses: responses([
                    (ResponseKind::Ok, "Resource replaced"),
                    (ResponseKind::NotFound, "Resource not found"),
                ]),
                ..verb(HttpMethod::Put, 200)
            },
        )
        .preset(
            "crud.patch",
            RouteOptions {
                responses: responses([
                    (ResponseKind::Ok, "Resource updated"),
                    (ResponseKind::NotFound, "Resource not found"),
                ]),
                ..verb(HttpMethod::Patch, 200)
            },
        )
        .preset(
            "crud.delete",
            RouteOptions {
                responses: responses([
                    (ResponseKind::NoContent, "Resource deleted"),
                    (ResponseKind::NotFound, "Resource not found"),
                ]),
                ..verb(HttpMethod::Delete, 204)
            },
        )
        .preset(
            "upload.single",
            RouteOptions {
                consumes: vec![MULTIPART_FORM_DATA.to_string()],
                file: Some(UploadOptions::field("file")),
                responses: responses([(ResponseKind::Created, "File stored")]),
                ..verb(HttpMethod::Post, 201)
            },
        )
        .preset(
            "upload.multiple",
            RouteOptions {
                consumes: vec![MULTIPART_FORM_DATA.to_string()],
                files: Some(UploadOptions {
                    max_count: Some(10),
                    ..UploadOptions::field("files")
                }),
                responses: responses([(ResponseKind::Created, "Files stored")]),
                ..verb(HttpMethod::Post, 201)
            },
        )
        .preset(
            "stream.sse",
            RouteOptions {
                sse: Some(true),
                produces: vec![EVENT_STREAM.to_string()],
                ..verb(HttpMethod::Get, 200)
            },
        )
        .preset(
            "auth.public",
            RouteOptions {
                security: Some(SecurityOptions {
                    public: Some(true),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .preset(
            "auth.protected",
            RouteOptions {
                security: Some(SecurityOptions {
                    public: Some(false),
                    schemes: vec!["bearer".to_string()],
                    ..Default::default()
                }),
                responses: responses([
                    (ResponseKind::Unauthorized, "Missing or invalid credentials"),
                    (ResponseKind::Forbidden, "Insufficient permissions"),
                ]),
                ..Default::default()
            },
        )
        .preset(
            "health.check",
            RouteOptions {
                security: Some(SecurityOptions {
                    public: Some(true),
                    ..Default::default()
                }),
                throttle: Some(ThrottleOptions {
                    skip: Some(true),
                    ..Default::default()
                }),
                telemetry: Some(TelemetryOptions {
                    log_request: Some(false),
                    log_response: Some(false),
                    ..Default::default()
                }),
                responses: responses([
                    (ResponseKind::Ok, "Service healthy"),
                    (ResponseKind::ServiceUnavailable, "Service unhealthy"),
                ]),
                ..verb(HttpMethod::Get, 200)
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lists_in_registration_order() {
        let names = PresetRegistry::builtin().list_presets();
        assert_eq!(names.first(), Some(&"crud.list"));
        assert!(names.contains(&"upload.multiple"));
        assert!(names.contains(&"health.check"));
        assert_eq!(names.len(), PresetRegistry::builtin().len());
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = PresetRegistry::builtin() as *const PresetRegistry;
        let b = PresetRegistry::builtin() as *const PresetRegistry;
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_preset_is_empty() {
        let presets = PresetRegistry::builtin();
        assert!(!presets.has_preset("nonexistent"));
        assert_eq!(presets.apply_preset("nonexistent"), RouteOptions::default());
        assert!(presets.get("nonexistent").is_none());
    }

    #[test]
    fn test_crud_create_is_post_201() {
        let fragment = PresetRegistry::builtin().apply_preset("crud.create");
        assert_eq!(fragment.method, Some(HttpMethod::Post));
        assert_eq!(fragment.http_code, Some(201));
        assert!(fragment.body.is_none());
    }

    #[test]
    fn test_stream_sse_declares_event_stream() {
        let fragment = PresetRegistry::builtin().apply_preset("stream.sse");
        assert!(fragment.is_sse());
        assert_eq!(fragment.produces, vec![EVENT_STREAM]);
    }

    #[test]
    fn test_upload_presets_consume_multipart() {
        let presets = PresetRegistry::builtin();
        for name in ["upload.single", "upload.multiple"] {
            let fragment = presets.apply_preset(name);
            assert!(fragment.has_upload(), "{name}");
            assert_eq!(fragment.consumes, vec![MULTIPART_FORM_DATA], "{name}");
        }
    }

    #[test]
    fn test_custom_registry_replaces_duplicate_names() {
        let registry = PresetRegistry::builder()
            .preset("admin", verb(HttpMethod::Get, 200))
            .preset("admin", verb(HttpMethod::Post, 201))
            .build();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.apply_preset("admin").method, Some(HttpMethod::Post));
    }

    #[test]
    fn test_builder_extends_builtins() {
        let registry = PresetRegistryBuilder::with_builtins()
            .preset("reports.export", verb(HttpMethod::Get, 202))
            .build();

        assert!(registry.has_preset("crud.list"));
        assert!(registry.has_preset("reports.export"));
        assert_eq!(registry.list_presets().last(), Some(&"reports.export"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = PresetRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.list_presets().is_empty());
    }
}
