//! Property tests for layered merging.
//!
//! Fragments are generated over a representative subset of fields: a
//! replaced scalar, concatenated sequences, a deep-merged block, the keyed
//! responses map and free-form extensions.

use proptest::prelude::*;
use serde_json::json;
use waymark_options::{
    merge_options, merge_with_defaults, CacheOptions, HttpMethod, Merge, ParamDescriptor,
    ResponseDescriptor, ResponseKind, RouteOptions,
};

fn method() -> impl Strategy<Value = Option<HttpMethod>> {
    prop::option::of(prop_oneof![
        Just(HttpMethod::Get),
        Just(HttpMethod::Post),
        Just(HttpMethod::Put),
        Just(HttpMethod::Delete),
    ])
}

fn cache() -> impl Strategy<Value = Option<CacheOptions>> {
    prop::option::of(
        (
            prop::option::of(any::<bool>()),
            prop::option::of(1i64..3600),
            prop::option::of("[a-z]{1,8}"),
        )
            .prop_map(|(enabled, ttl, key)| CacheOptions { enabled, ttl, key }),
    )
}

fn responses() -> impl Strategy<Value = Vec<(ResponseKind, Option<String>, Option<String>)>> {
    prop::collection::vec(
        (
            prop_oneof![
                Just(ResponseKind::Ok),
                Just(ResponseKind::Created),
                Just(ResponseKind::NotFound),
            ],
            prop::option::of("[a-z ]{1,12}"),
            prop::option::of("[A-Z][a-z]{1,6}Dto"),
        ),
        0..3,
    )
}

fn extensions() -> impl Strategy<Value = Option<serde_json::Value>> {
    prop::option::of(
        (
            prop::option::of("[a-z]{1,6}"),
            prop::collection::vec("[a-z]{1,4}", 0..3),
        )
            .prop_map(|(owner, flags)| match owner {
                Some(owner) => json!({"x-owner": owner, "x-flags": flags}),
                None => json!({"x-flags": flags}),
            }),
    )
}

prop_compose! {
    fn fragment()(
        method in method(),
        http_code in prop::option::of(200u16..600),
        tags in prop::collection::vec("[a-z]{1,6}", 0..3),
        headers in prop::collection::vec("x-[a-z]{1,6}", 0..3),
        cache in cache(),
        responses in responses(),
        extensions in extensions(),
    ) -> RouteOptions {
        let mut options = RouteOptions {
            method,
            http_code,
            tags,
            headers: headers.into_iter().map(ParamDescriptor::new).collect(),
            cache,
            extensions,
            ..Default::default()
        };
        for (kind, description, type_ref) in responses {
            let descriptor = ResponseDescriptor {
                description,
                type_ref,
                ..Default::default()
            };
            match options.responses.get_mut(&kind) {
                Some(existing) => existing.merge(descriptor),
                None => {
                    options.responses.insert(kind, descriptor);
                }
            }
        }
        options
    }
}

proptest! {
    #[test]
    fn test_merge_is_associative(a in fragment(), b in fragment(), c in fragment()) {
        let flat = merge_options([a.clone(), b.clone(), c.clone()]);
        let nested_left = merge_options([merge_options([a.clone(), b.clone()]), c.clone()]);
        let nested_right = merge_options([a, merge_options([b, c])]);

        prop_assert_eq!(&flat, &nested_left);
        prop_assert_eq!(&flat, &nested_right);
    }

    #[test]
    fn test_empty_fragment_is_identity(a in fragment()) {
        prop_assert_eq!(merge_options([a.clone()]), a.clone());
        prop_assert_eq!(merge_options([RouteOptions::default(), a.clone()]), a.clone());
        prop_assert_eq!(merge_options([a.clone(), RouteOptions::default()]), a);
    }

    #[test]
    fn test_sequences_concatenate(a in fragment(), b in fragment()) {
        let merged = merge_options([a.clone(), b.clone()]);
        let expected: Vec<String> = a.tags.iter().chain(b.tags.iter()).cloned().collect();
        prop_assert_eq!(merged.tags, expected);
        prop_assert_eq!(merged.headers.len(), a.headers.len() + b.headers.len());
    }

    #[test]
    fn test_later_scalar_wins(a in fragment(), b in fragment()) {
        let merged = merge_options([a.clone(), b.clone()]);
        prop_assert_eq!(merged.http_code, b.http_code.or(a.http_code));
        prop_assert_eq!(merged.method, b.method.or(a.method));
    }

    #[test]
    fn test_disable_defaults_returns_user_verbatim(defaults in fragment(), user in fragment()) {
        let user = RouteOptions { disable_defaults: Some(true), ..user };
        prop_assert_eq!(merge_with_defaults(defaults, user.clone()), user);
    }
}
