//! Consistency rules for merged route options.
//!
//! Hard conflicts abort compilation with [`OptionsError::Conflict`]; soft
//! inconsistencies are reported as [`RouteWarning`]s to a [`WarningSink`].
//! Rules run in a fixed order and stop at the first conflict, so warnings
//! from earlier rules are still delivered.
//!
//! | # | Condition | Outcome |
//! |---|-----------|---------|
//! | 1 | `sse` with `body` | conflict |
//! | 2 | upload with `body` | warning |
//! | 3 | `redirect` with `responses` | warning |
//! | 4 | `sse` with `redirect` | conflict |
//! | 5 | `sse` without `text/event-stream` in `produces` | warning |
//! | 6 | upload without `multipart/form-data` in `consumes` | warning |
//! | 7 | `render` with `sse` | conflict |
//! | 8 | `file` with `files` | conflict |
//! | 9 | `cache.enabled` on a non-GET method | warning |
//! | 10 | `redirect` with a non-3xx `httpCode` | warning |

use std::fmt;

use serde::Serialize;

use crate::defaults::{EVENT_STREAM, MULTIPART_FORM_DATA};
use crate::{CacheOptions, HttpMethod, OptionsError, OptionsResult, RouteOptions, ThrottleOptions};

/// Which upload option made an upload rule fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadField {
    /// Single-file upload, `file`.
    File,
    /// Multi-file upload, `files`.
    Files,
}

impl UploadField {
    /// The option name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Files => "files",
        }
    }

    /// `file` wins when both are set.
    fn of(options: &RouteOptions) -> Option<Self> {
        if options.file.is_some() {
            Some(Self::File)
        } else if options.files.is_some() {
            Some(Self::Files)
        } else {
            None
        }
    }
}

impl fmt::Display for UploadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A soft inconsistency that does not block compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RouteWarning {
    /// Upload endpoints normally take their payload from multipart parts.
    UploadWithBody {
        /// The upload option that is set.
        field: UploadField,
    },
    /// Response documentation is ignored on redirects.
    RedirectIgnoresResponses,
    /// SSE endpoint does not advertise `text/event-stream`.
    SseWithoutEventStream,
    /// Upload endpoint does not accept `multipart/form-data`.
    UploadWithoutMultipart {
        /// The upload option that is set.
        field: UploadField,
    },
    /// Caching is enabled on a method that is not `GET`.
    CacheOnNonGet {
        /// The configured method.
        method: HttpMethod,
    },
    /// A redirect is configured with a status outside `300..400`.
    RedirectStatusNotRedirection {
        /// The configured status code.
        http_code: u16,
    },
}

impl RouteWarning {
    /// Names of the options involved.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::UploadWithBody { field } => match field {
                UploadField::File => &["file", "body"],
                UploadField::Files => &["files", "body"],
            },
            Self::RedirectIgnoresResponses => &["redirect", "responses"],
            Self::SseWithoutEventStream => &["sse", "produces"],
            Self::UploadWithoutMultipart { field } => match field {
                UploadField::File => &["file", "consumes"],
                UploadField::Files => &["files", "consumes"],
            },
            Self::CacheOnNonGet { .. } => &["cache", "method"],
            Self::RedirectStatusNotRedirection { .. } => &["redirect", "httpCode"],
        }
    }
}

impl fmt::Display for RouteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UploadWithBody { field } => {
                write!(f, "`{field}` upload endpoints usually do not declare a body DTO")
            }
            Self::RedirectIgnoresResponses => {
                f.write_str("redirect endpoints ignore documented responses")
            }
            Self::SseWithoutEventStream => write!(f, "SSE endpoint should produce {EVENT_STREAM}"),
            Self::UploadWithoutMultipart { field } => {
                write!(f, "`{field}` upload endpoint should consume {MULTIPART_FORM_DATA}")
            }
            Self::CacheOnNonGet { method } => {
                write!(f, "caching is enabled on non-idempotent method {method}")
            }
            Self::RedirectStatusNotRedirection { http_code } => {
                write!(f, "redirect endpoint uses non-3xx status code {http_code}")
            }
        }
    }
}

/// Receives warnings as rules fire.
pub trait WarningSink {
    /// Records one warning.
    fn warn(&mut self, warning: RouteWarning);
}

/// Collects warnings in rule order.
impl WarningSink for Vec<RouteWarning> {
    fn warn(&mut self, warning: RouteWarning) {
        self.push(warning);
    }
}

/// Logs each warning at WARN level.
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    endpoint: Option<String>,
}

impl TracingSink {
    /// A sink that tags log lines with the endpoint identifier.
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
        }
    }
}

impl WarningSink for TracingSink {
    fn warn(&mut self, warning: RouteWarning) {
        tracing::warn!(
            endpoint = self.endpoint.as_deref().unwrap_or("<anonymous>"),
            options = ?warning.options(),
            "{warning}"
        );
    }
}

/// Checks `options` for conflicting combinations, logging warnings.
pub fn validate_route_options(options: &RouteOptions) -> OptionsResult<()> {
    validate_route_options_with(options, &mut TracingSink::default())
}

/// Checks `options` for conflicting combinations, reporting warnings to
/// `sink`.
///
/// ```
/// use waymark_options::{validate_route_options_with, BodyOptions, RouteOptions};
///
/// let options = RouteOptions {
///     sse: Some(true),
///     body: Some(BodyOptions::default()),
///     ..Default::default()
/// };
///
/// let mut warnings = Vec::new();
/// let err = validate_route_options_with(&options, &mut warnings).unwrap_err();
/// assert_eq!(err.as_conflict().unwrap().options(), ["sse", "body"]);
/// ```
pub fn validate_route_options_with(
    options: &RouteOptions,
    sink: &mut dyn WarningSink,
) -> OptionsResult<()> {
    let sse = options.is_sse();
    let upload = UploadField::of(options);

    if sse && options.body.is_some() {
        return Err(OptionsError::conflict(
            ["sse", "body"],
            "server-sent event endpoints cannot accept a request body",
        ));
    }

    if let (Some(field), Some(_)) = (upload, &options.body) {
        sink.warn(RouteWarning::UploadWithBody { field });
    }

    if options.redirect.is_some() && !options.responses.is_empty() {
        sink.warn(RouteWarning::RedirectIgnoresResponses);
    }

    if sse && options.redirect.is_some() {
        return Err(OptionsError::conflict(
            ["sse", "redirect"],
            "server-sent events and redirects are mutually exclusive response modes",
        ));
    }

    if sse && !contains_media_type(&options.produces, EVENT_STREAM) {
        sink.warn(RouteWarning::SseWithoutEventStream);
    }

    if let Some(field) = upload {
        if !contains_media_type(&options.consumes, MULTIPART_FORM_DATA) {
            sink.warn(RouteWarning::UploadWithoutMultipart { field });
        }
    }

    if options.render.is_some() && sse {
        return Err(OptionsError::conflict(
            ["render", "sse"],
            "template rendering and server-sent events are mutually exclusive response modes",
        ));
    }

    if options.file.is_some() && options.files.is_some() {
        return Err(OptionsError::conflict(
            ["file", "files"],
            "single and multiple file upload are mutually exclusive",
        ));
    }

    let cache_enabled = options
        .cache
        .as_ref()
        .is_some_and(|cache| cache.enabled == Some(true));
    let method = options.effective_method();
    if cache_enabled && method != HttpMethod::Get {
        sink.warn(RouteWarning::CacheOnNonGet { method });
    }

    if options.redirect.is_some() {
        if let Some(http_code) = options.http_code {
            if !(300..400).contains(&http_code) {
                sink.warn(RouteWarning::RedirectStatusNotRedirection { http_code });
            }
        }
    }

    Ok(())
}

/// Checks that `cache.ttl`, when set, is positive.
pub fn validate_cache_config(cache: &CacheOptions) -> OptionsResult<()> {
    if let Some(ttl) = cache.ttl {
        ensure_positive("cache.ttl", ttl)?;
    }
    Ok(())
}

/// Checks that `throttle.limit` and `throttle.ttl`, when set, are positive.
pub fn validate_throttle_config(throttle: &ThrottleOptions) -> OptionsResult<()> {
    if let Some(limit) = throttle.limit {
        ensure_positive("throttle.limit", limit)?;
    }
    if let Some(ttl) = throttle.ttl {
        ensure_positive("throttle.ttl", ttl)?;
    }
    Ok(())
}

fn ensure_positive(field: &str, value: i64) -> OptionsResult<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(OptionsError::invalid_value(
            field,
            format!("must be a positive number, got {value}"),
        ))
    }
}

fn contains_media_type(list: &[String], media_type: &str) -> bool {
    list.iter().any(|entry| {
        entry
            .split(';')
            .next()
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(media_type))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BodyOptions, RedirectOptions, ResponseDescriptor, ResponseKind, UploadOptions};

    fn check(options: &RouteOptions) -> (OptionsResult<()>, Vec<RouteWarning>) {
        let mut warnings = Vec::new();
        let result = validate_route_options_with(options, &mut warnings);
        (result, warnings)
    }

    fn conflict_names(result: OptionsResult<()>) -> Vec<String> {
        result
            .unwrap_err()
            .as_conflict()
            .expect("conflict error")
            .options()
            .to_vec()
    }

    #[test]
    fn test_empty_options_are_valid() {
        let (result, warnings) = check(&RouteOptions::default());
        assert!(result.is_ok());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_sse_with_body_conflicts() {
        let options = RouteOptions {
            sse: Some(true),
            body: Some(BodyOptions::default()),
            ..Default::default()
        };
        let (result, _) = check(&options);
        assert_eq!(conflict_names(result), ["sse", "body"]);
    }

    #[test]
    fn test_sse_false_with_body_is_fine() {
        let options = RouteOptions {
            sse: Some(false),
            body: Some(BodyOptions::default()),
            ..Default::default()
        };
        assert!(check(&options).0.is_ok());
    }

    #[test]
    fn test_upload_with_body_warns() {
        let options = RouteOptions {
            file: Some(UploadOptions::field("file")),
            consumes: vec![MULTIPART_FORM_DATA.into()],
            body: Some(BodyOptions::dto("MetadataDto")),
            ..Default::default()
        };
        let (result, warnings) = check(&options);
        assert!(result.is_ok());
        assert_eq!(
            warnings,
            vec![RouteWarning::UploadWithBody {
                field: UploadField::File
            }]
        );
        assert_eq!(warnings[0].options(), ["file", "body"]);
    }

    #[test]
    fn test_multi_file_upload_warnings_name_files() {
        let options = RouteOptions {
            files: Some(UploadOptions::field("attachments")),
            body: Some(BodyOptions::dto("MetadataDto")),
            ..Default::default()
        };
        let (result, warnings) = check(&options);
        assert!(result.is_ok());
        let named: Vec<_> = warnings.iter().map(RouteWarning::options).collect();
        assert_eq!(named, [["files", "body"], ["files", "consumes"]]);
        assert!(warnings[0].to_string().starts_with("`files` upload"));
        assert_eq!(
            serde_json::to_value(&warnings[1]).unwrap(),
            serde_json::json!({"rule": "upload_without_multipart", "field": "files"})
        );
    }

    #[test]
    fn test_redirect_with_responses_warns() {
        let mut options = RouteOptions {
            redirect: Some(RedirectOptions::to("/home")),
            ..Default::default()
        };
        options
            .responses
            .insert(ResponseKind::Ok, ResponseDescriptor::described("ok"));
        let (result, warnings) = check(&options);
        assert!(result.is_ok());
        assert_eq!(warnings, vec![RouteWarning::RedirectIgnoresResponses]);
    }

    #[test]
    fn test_sse_with_redirect_conflicts() {
        let options = RouteOptions {
            sse: Some(true),
            redirect: Some(RedirectOptions::to("/elsewhere")),
            ..Default::default()
        };
        let (result, _) = check(&options);
        assert_eq!(conflict_names(result), ["sse", "redirect"]);
    }

    #[test]
    fn test_sse_without_event_stream_warns() {
        let options = RouteOptions {
            sse: Some(true),
            produces: vec!["application/json".into()],
            ..Default::default()
        };
        let (result, warnings) = check(&options);
        assert!(result.is_ok());
        assert_eq!(warnings, vec![RouteWarning::SseWithoutEventStream]);
    }

    #[test]
    fn test_sse_media_type_match_ignores_parameters() {
        let options = RouteOptions {
            sse: Some(true),
            produces: vec!["Text/Event-Stream; charset=utf-8".into()],
            ..Default::default()
        };
        let (_, warnings) = check(&options);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_upload_without_multipart_warns() {
        let options = RouteOptions {
            files: Some(UploadOptions::field("files")),
            ..Default::default()
        };
        let (result, warnings) = check(&options);
        assert!(result.is_ok());
        assert_eq!(
            warnings,
            vec![RouteWarning::UploadWithoutMultipart {
                field: UploadField::Files
            }]
        );
        assert_eq!(warnings[0].options(), ["files", "consumes"]);
    }

    #[test]
    fn test_render_with_sse_conflicts() {
        let options = RouteOptions {
            sse: Some(true),
            produces: vec![EVENT_STREAM.into()],
            render: Some("dashboard".into()),
            ..Default::default()
        };
        let (result, warnings) = check(&options);
        assert_eq!(conflict_names(result), ["render", "sse"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_file_and_files_conflict() {
        let options = RouteOptions {
            file: Some(UploadOptions::field("avatar")),
            files: Some(UploadOptions::field("photos")),
            consumes: vec![MULTIPART_FORM_DATA.into()],
            ..Default::default()
        };
        let (result, _) = check(&options);
        assert_eq!(conflict_names(result), ["file", "files"]);
    }

    #[test]
    fn test_warnings_before_conflict_are_delivered() {
        let options = RouteOptions {
            file: Some(UploadOptions::field("avatar")),
            files: Some(UploadOptions::field("photos")),
            body: Some(BodyOptions::default()),
            ..Default::default()
        };
        let (result, warnings) = check(&options);
        assert!(result.is_err());
        assert_eq!(
            warnings,
            vec![
                RouteWarning::UploadWithBody {
                    field: UploadField::File
                },
                RouteWarning::UploadWithoutMultipart {
                    field: UploadField::File
                }
            ]
        );
    }

    #[test]
    fn test_cache_on_post_warns() {
        let options = RouteOptions {
            method: Some(HttpMethod::Post),
            cache: Some(CacheOptions {
                enabled: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        let (_, warnings) = check(&options);
        assert_eq!(
            warnings,
            vec![RouteWarning::CacheOnNonGet {
                method: HttpMethod::Post
            }]
        );
    }

    #[test]
    fn test_cache_without_method_is_treated_as_get() {
        let options = RouteOptions {
            cache: Some(CacheOptions {
                enabled: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        let (_, warnings) = check(&options);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_redirect_with_non_3xx_warns() {
        let options = RouteOptions {
            redirect: Some(RedirectOptions::to("/next")),
            http_code: Some(200),
            ..Default::default()
        };
        let (_, warnings) = check(&options);
        assert_eq!(
            warnings,
            vec![RouteWarning::RedirectStatusNotRedirection { http_code: 200 }]
        );

        let options = RouteOptions {
            redirect: Some(RedirectOptions::to("/next")),
            http_code: Some(301),
            ..Default::default()
        };
        assert!(check(&options).1.is_empty());
    }

    #[test]
    fn test_validate_cache_config() {
        let negative = CacheOptions {
            enabled: Some(true),
            ttl: Some(-5),
            key: None,
        };
        let err = validate_cache_config(&negative).unwrap_err();
        assert!(matches!(err, OptionsError::InvalidValue { ref field, .. } if field == "cache.ttl"));

        let positive = CacheOptions {
            enabled: Some(true),
            ttl: Some(60),
            key: None,
        };
        assert!(validate_cache_config(&positive).is_ok());
        assert!(validate_cache_config(&CacheOptions::default()).is_ok());
    }

    #[test]
    fn test_validate_throttle_config() {
        let zero_limit = ThrottleOptions {
            limit: Some(0),
            ttl: Some(60),
            skip: None,
        };
        let err = validate_throttle_config(&zero_limit).unwrap_err();
        assert!(err.to_string().contains("throttle.limit"));

        let bad_ttl = ThrottleOptions {
            limit: Some(10),
            ttl: Some(-1),
            skip: None,
        };
        let err = validate_throttle_config(&bad_ttl).unwrap_err();
        assert!(err.to_string().contains("throttle.ttl"));

        assert!(validate_throttle_config(&ThrottleOptions {
            limit: Some(10),
            ttl: Some(60),
            skip: None,
        })
        .is_ok());
    }

    #[test]
    fn test_warning_display_and_options() {
        let warning = RouteWarning::CacheOnNonGet {
            method: HttpMethod::Delete,
        };
        assert!(warning.to_string().contains("DELETE"));
        assert_eq!(warning.options(), ["cache", "method"]);
    }

    #[test]
    fn test_tracing_sink_accepts_warnings() {
        let mut sink = TracingSink::for_endpoint("listUsers");
        sink.warn(RouteWarning::SseWithoutEventStream);
    }
}
