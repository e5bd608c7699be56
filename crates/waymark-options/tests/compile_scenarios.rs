//! End-to-end compilation scenarios.
//!
//! Each test drives the public API the way an endpoint definition would:
//! preset name plus a literal fragment in, compiled route or error out.

use serde_json::json;
use waymark_options::{
    merge_options, merge_with_defaults, validate_cache_config, validate_route_options,
    validate_route_options_with, CacheOptions, HttpMethod, OptionsError, ParamDescriptor,
    PresetPolicy, PresetRegistry, RouteCompiler, RouteOptions, RouteWarning, UploadOptions,
    WarningPolicy,
};

fn fragment(value: serde_json::Value) -> RouteOptions {
    RouteOptions::from_json(value).expect("valid fragment literal")
}

#[test]
fn test_crud_list_with_cache_compiles_cleanly() {
    let route = RouteCompiler::new()
        .with_warning_policy(WarningPolicy::Deny)
        .compile_endpoint(
            "listUsers",
            Some("crud.list"),
            fragment(json!({
                "path": "/users",
                "cache": {"key": "users-list", "ttl": 60}
            })),
        )
        .expect("crud.list compiles");

    let options = route.options();
    assert_eq!(options.method, Some(HttpMethod::Get));
    assert_eq!(options.http_code, Some(200));
    assert_eq!(options.path.as_deref(), Some("/users"));

    let cache = options.cache.as_ref().unwrap();
    assert_eq!(cache.key.as_deref(), Some("users-list"));
    assert_eq!(cache.ttl, Some(60));
    assert!(route.warnings().is_empty());
}

#[test]
fn test_crud_list_scenario_with_bare_operations() {
    let preset = PresetRegistry::builtin().apply_preset("crud.list");
    let user = fragment(json!({
        "path": "/users",
        "cache": {"key": "users-list", "ttl": 60}
    }));

    let merged = merge_options([RouteOptions::default(), preset, user]);
    let mut warnings = Vec::new();
    validate_route_options_with(&merged, &mut warnings).unwrap();
    validate_cache_config(merged.cache.as_ref().unwrap()).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(
        merged.to_json().unwrap(),
        json!({
            "method": "GET",
            "path": "/users",
            "httpCode": 200,
            "responses": {"ok": {"description": "List of resources"}},
            "cache": {"key": "users-list", "ttl": 60}
        })
    );
}

#[test]
fn test_crud_create_with_sse_body_fails_before_registration() {
    let err = RouteCompiler::new()
        .compile(
            Some("crud.create"),
            fragment(json!({"sse": true, "body": {"schema": {}}})),
        )
        .unwrap_err();

    let conflict = err.as_conflict().expect("conflict error");
    assert_eq!(conflict.options(), ["sse", "body"]);
}

#[test]
fn test_header_arrays_concatenate_in_order() {
    let merged = merge_options([
        RouteOptions {
            headers: vec![ParamDescriptor::new("h1")],
            ..Default::default()
        },
        RouteOptions {
            headers: vec![ParamDescriptor::new("h2")],
            ..Default::default()
        },
    ]);
    let names: Vec<_> = merged.headers.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["h1", "h2"]);
}

#[test]
fn test_cache_blocks_deep_merge() {
    let merged = merge_options([
        fragment(json!({"cache": {"enabled": true}})),
        fragment(json!({"cache": {"ttl": 60}})),
    ]);
    assert_eq!(
        merged.cache,
        Some(CacheOptions {
            enabled: Some(true),
            ttl: Some(60),
            key: None,
        })
    );
}

#[test]
fn test_scalar_http_code_is_replaced() {
    let merged = merge_options([
        fragment(json!({"httpCode": 200})),
        fragment(json!({"httpCode": 201})),
    ]);
    assert_eq!(merged.to_json().unwrap(), json!({"httpCode": 201}));
}

#[test]
fn test_disable_defaults_bypasses_default_layer() {
    let merged = merge_with_defaults(
        fragment(json!({"httpCode": 200})),
        fragment(json!({"httpCode": 201, "disableDefaults": true})),
    );
    assert_eq!(
        merged.to_json().unwrap(),
        json!({"httpCode": 201, "disableDefaults": true})
    );
}

#[test]
fn test_unknown_preset_falls_back_to_empty() {
    let presets = PresetRegistry::builtin();
    assert!(presets.apply_preset("nonexistent").is_empty());
    assert!(!presets.has_preset("nonexistent"));
}

#[test]
fn test_strict_policy_reports_preset_typos() {
    let err = RouteCompiler::new()
        .with_preset_policy(PresetPolicy::Strict)
        .compile(Some("crud.lst"), RouteOptions::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown route preset: crud.lst");
}

#[test]
fn test_file_and_files_conflict() {
    let options = RouteOptions {
        file: Some(UploadOptions::field("avatar")),
        files: Some(UploadOptions::field("gallery")),
        ..Default::default()
    };
    let err = validate_route_options(&options).unwrap_err();
    assert_eq!(err.as_conflict().unwrap().options(), ["file", "files"]);
}

#[test]
fn test_cache_ttl_must_be_positive() {
    let err = validate_cache_config(&CacheOptions {
        enabled: Some(true),
        ttl: Some(-5),
        key: None,
    })
    .unwrap_err();
    assert!(matches!(err, OptionsError::InvalidValue { .. }));
    assert!(err.as_conflict().is_none());

    validate_cache_config(&CacheOptions {
        enabled: Some(true),
        ttl: Some(60),
        key: None,
    })
    .unwrap();
}

#[test]
fn test_sse_preset_with_render_conflicts() {
    let err = RouteCompiler::new()
        .compile(Some("stream.sse"), fragment(json!({"render": "feed"})))
        .unwrap_err();
    assert_eq!(err.as_conflict().unwrap().options(), ["render", "sse"]);
}

#[test]
fn test_cached_post_is_compiled_with_warning() {
    let route = RouteCompiler::new()
        .with_warning_policy(WarningPolicy::Ignore)
        .compile(
            Some("crud.create"),
            fragment(json!({"path": "/orders", "cache": {"enabled": true}})),
        )
        .unwrap();

    assert_eq!(
        route.warnings(),
        [RouteWarning::CacheOnNonGet {
            method: HttpMethod::Post
        }]
    );
    assert_eq!(route.options().cache.as_ref().unwrap().ttl, Some(300));
}

#[test]
fn test_upload_preset_with_user_consumes_is_quiet() {
    let route = RouteCompiler::new()
        .with_warning_policy(WarningPolicy::Deny)
        .compile(
            Some("upload.single"),
            fragment(json!({"path": "/avatars", "file": {"maxSize": 1048576}})),
        )
        .unwrap();

    let file = route.options().file.as_ref().unwrap();
    assert_eq!(file.field_name.as_deref(), Some("file"));
    assert_eq!(file.max_size, Some(1_048_576));
}
