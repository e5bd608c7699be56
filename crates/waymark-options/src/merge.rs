//! Layered merging of route option fragments.
//!
//! Every field of [`RouteOptions`] declares how it combines with the same
//! field from a later (higher-precedence) fragment:
//!
//! | Strategy | Applies to | Behaviour |
//! |----------|------------|-----------|
//! | [`replace`] | scalars, enums, strings | incoming `Some` overwrites, `None` keeps |
//! | [`concat`] | sequences | accumulated ++ incoming, order kept, no dedup |
//! | [`deep`] | nested option objects | recursive [`Merge`] |
//! | [`entries`] | keyed maps | per-key [`Merge`], new keys appended |
//! | [`json`] | free-form JSON | objects merge, arrays concatenate, others replace |
//!
//! # Example
//!
//! ```
//! use waymark_options::{merge_options, CacheOptions, RouteOptions};
//!
//! let defaults = RouteOptions {
//!     http_code: Some(200),
//!     cache: Some(CacheOptions { enabled: Some(true), ..Default::default() }),
//!     ..Default::default()
//! };
//! let user = RouteOptions {
//!     http_code: Some(201),
//!     cache: Some(CacheOptions { ttl: Some(60), ..Default::default() }),
//!     ..Default::default()
//! };
//!
//! let merged = merge_options([defaults, user]);
//! assert_eq!(merged.http_code, Some(201));
//! let cache = merged.cache.unwrap();
//! assert_eq!(cache.enabled, Some(true));
//! assert_eq!(cache.ttl, Some(60));
//! ```

use std::hash::Hash;

use indexmap::IndexMap;
use serde_json::Value;

use crate::RouteOptions;

/// A value that can absorb a higher-precedence value of the same type.
pub trait Merge {
    /// Merges `incoming` into `self`; `incoming` wins where both are set.
    fn merge(&mut self, incoming: Self);

    /// Consuming variant of [`Merge::merge`].
    fn merged(mut self, incoming: Self) -> Self
    where
        Self: Sized,
    {
        self.merge(incoming);
        self
    }
}

/// A value whose unset sub-fields can be filled from a defaults table.
///
/// Unlike [`Merge`], explicit values always win and sequences are only
/// taken from the defaults when the explicit sequence is empty.
pub trait FillDefaults {
    /// Fills every unset field of `self` from `defaults`.
    fn fill_from(&mut self, defaults: Self);
}

/// Overwrites `acc` when `incoming` is set.
pub fn replace<T>(acc: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *acc = incoming;
    }
}

/// Appends `incoming` to `acc`.
pub fn concat<T>(acc: &mut Vec<T>, incoming: Vec<T>) {
    acc.extend(incoming);
}

/// Recursively merges nested option objects.
pub fn deep<T: Merge>(acc: &mut Option<T>, incoming: Option<T>) {
    match (acc.as_mut(), incoming) {
        (Some(current), Some(next)) => current.merge(next),
        (None, Some(next)) => *acc = Some(next),
        (_, None) => {}
    }
}

/// Merges maps key by key, appending keys not yet present.
pub fn entries<K, V>(acc: &mut IndexMap<K, V>, incoming: IndexMap<K, V>)
where
    K: Hash + Eq,
    V: Merge,
{
    for (key, value) in incoming {
        match acc.get_mut(&key) {
            Some(existing) => existing.merge(value),
            None => {
                acc.insert(key, value);
            }
        }
    }
}

/// Merges optional free-form JSON values with [`merge_json`].
pub fn json(acc: &mut Option<Value>, incoming: Option<Value>) {
    match (acc.as_mut(), incoming) {
        (Some(current), Some(next)) => merge_json(current, next),
        (None, Some(next)) => *acc = Some(next),
        (_, None) => {}
    }
}

/// Takes the default when `acc` is unset.
pub fn fill<T>(acc: &mut Option<T>, default: Option<T>) {
    if acc.is_none() {
        *acc = default;
    }
}

/// Takes the default sequence when `acc` is empty.
pub fn fill_vec<T>(acc: &mut Vec<T>, default: Vec<T>) {
    if acc.is_empty() {
        *acc = default;
    }
}

/// Overlays `layer` onto `target` using shape-driven rules.
///
/// - Object into object: keys merge recursively.
/// - Array into array: `layer` elements are appended.
/// - Anything else: `layer` replaces `target` (including `null`).
///
/// ```
/// use serde_json::json;
/// use waymark_options::merge::merge_json;
///
/// let mut acc = json!({"a": 1, "tags": ["x"], "nested": {"k": 1}});
/// merge_json(&mut acc, json!({"tags": ["y"], "nested": {"j": 2}, "a": 3}));
/// assert_eq!(acc, json!({"a": 3, "tags": ["x", "y"], "nested": {"k": 1, "j": 2}}));
/// ```
pub fn merge_json(target: &mut Value, layer: Value) {
    match (target, layer) {
        (Value::Object(current), Value::Object(next)) => {
            for (key, value) in next {
                match current.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        current.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(current), Value::Array(next)) => current.extend(next),
        (target, layer) => *target = layer,
    }
}

/// Applies the listed strategy to each listed field of two values.
///
/// ```ignore
/// merge_fields!(self, incoming, {
///     replace: [enabled, ttl],
///     concat: [roles],
/// });
/// ```
macro_rules! merge_fields {
    ($acc:expr, $incoming:expr, { $($strategy:ident: [$($field:ident),* $(,)?]),* $(,)? }) => {
        $( $( $crate::merge::$strategy(&mut $acc.$field, $incoming.$field); )* )*
    };
}

pub(crate) use merge_fields;

/// Folds `fragments` left to right; later fragments take precedence.
///
/// An empty input yields an empty fragment.
pub fn merge_options<I>(fragments: I) -> RouteOptions
where
    I: IntoIterator<Item = RouteOptions>,
{
    fragments
        .into_iter()
        .fold(RouteOptions::default(), RouteOptions::merged)
}

/// Merges `user` over `defaults` unless `user` opts out of defaults.
///
/// When `user.disable_defaults == Some(true)` the user fragment is
/// returned verbatim and `defaults` is discarded entirely.
///
/// ```
/// use waymark_options::{merge_with_defaults, RouteOptions};
///
/// let defaults = RouteOptions { http_code: Some(200), tags: vec!["api".into()], ..Default::default() };
/// let user = RouteOptions { http_code: Some(201), disable_defaults: Some(true), ..Default::default() };
///
/// let merged = merge_with_defaults(defaults, user.clone());
/// assert_eq!(merged, user);
/// ```
pub fn merge_with_defaults(defaults: RouteOptions, user: RouteOptions) -> RouteOptions {
    if user.defaults_disabled() {
        return user;
    }
    merge_options([defaults, user])
}
