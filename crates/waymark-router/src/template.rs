//! Path templates.
//!
//! Templates are written with `{name}` or `:name` parameters and an optional
//! trailing `*name` catch-all. Both parameter spellings normalise to the
//! brace form, so `/users/:id` and `/users/{id}` are the same route.
//!
//! A catch-all captures the rest of the path, which may be empty:
//! `/files/*rest` matches `/files/a/b` with `rest = "a/b"` and `/files`
//! with `rest = ""`.

use std::fmt;

use thiserror::Error;

/// Reasons a path template is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Templates are absolute.
    #[error("path must start with '/'")]
    MissingLeadingSlash,

    /// `{}`, `:` or `*` without a name.
    #[error("segment '{segment}' has an empty parameter name")]
    EmptyName {
        /// The offending segment.
        segment: String,
    },

    /// Parameter names are limited to ASCII alphanumerics, `_` and `-`.
    #[error("invalid parameter name '{name}'")]
    InvalidName {
        /// The offending name.
        name: String,
    },

    /// A static segment contains a stray brace.
    #[error("unbalanced braces in segment '{segment}'")]
    UnbalancedBraces {
        /// The offending segment.
        segment: String,
    },

    /// The same parameter name appears twice.
    #[error("parameter '{name}' appears more than once")]
    DuplicateParam {
        /// The repeated name.
        name: String,
    },

    /// A catch-all is followed by more segments.
    #[error("wildcard '*{name}' must be the last segment")]
    WildcardNotLast {
        /// The wildcard name.
        name: String,
    },
}

/// One segment of a [`PathTemplate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal text.
    Static(String),
    /// Named single-segment capture.
    Param(String),
    /// Named capture of every remaining segment.
    Wildcard(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.write_str(text),
            Self::Param(name) => write!(f, "{{{name}}}"),
            Self::Wildcard(name) => write!(f, "*{name}"),
        }
    }
}

/// A parsed, normalised path template.
///
/// # Example
///
/// ```rust
/// use waymark_router::PathTemplate;
///
/// let template = PathTemplate::parse("/orgs/:orgId/users/{userId}/")?;
/// assert_eq!(template.to_string(), "/orgs/{orgId}/users/{userId}");
/// assert_eq!(template.param_names().collect::<Vec<_>>(), ["orgId", "userId"]);
/// # Ok::<(), waymark_router::TemplateError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// The root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses `path`. Empty segments (`//`, trailing `/`) are ignored.
    pub fn parse(path: &str) -> Result<Self, TemplateError> {
        if !path.starts_with('/') {
            return Err(TemplateError::MissingLeadingSlash);
        }

        let mut segments = Vec::new();
        for raw in path.split('/').filter(|s| !s.is_empty()) {
            if let Some(Segment::Wildcard(name)) = segments.last() {
                return Err(TemplateError::WildcardNotLast { name: name.clone() });
            }
            segments.push(parse_segment(raw)?);
        }

        let template = Self { segments };
        template.check_unique_names()?;
        Ok(template)
    }

    /// Segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of every capture, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) | Segment::Wildcard(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Whether the template ends in a catch-all.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard(_)))
    }

    /// Whether this is `/`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends `suffix` beneath this template.
    pub fn join(&self, suffix: &Self) -> Result<Self, TemplateError> {
        if let Some(Segment::Wildcard(name)) = self.segments.last() {
            if !suffix.is_root() {
                return Err(TemplateError::WildcardNotLast { name: name.clone() });
            }
        }

        let joined = Self {
            segments: self
                .segments
                .iter()
                .chain(suffix.segments.iter())
                .cloned()
                .collect(),
        };
        joined.check_unique_names()?;
        Ok(joined)
    }

    fn check_unique_names(&self) -> Result<(), TemplateError> {
        let names: Vec<&str> = self.param_names().collect();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(TemplateError::DuplicateParam {
                    name: (*name).to_string(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

fn parse_segment(raw: &str) -> Result<Segment, TemplateError> {
    if let Some(inner) = raw.strip_prefix('{') {
        let name = inner
            .strip_suffix('}')
            .ok_or_else(|| TemplateError::UnbalancedBraces {
                segment: raw.to_string(),
            })?;
        return Ok(Segment::Param(check_name(raw, name)?));
    }
    if let Some(name) = raw.strip_prefix(':') {
        return Ok(Segment::Param(check_name(raw, name)?));
    }
    if let Some(name) = raw.strip_prefix('*') {
        return Ok(Segment::Wildcard(check_name(raw, name)?));
    }
    if raw.contains(['{', '}']) {
        return Err(TemplateError::UnbalancedBraces {
            segment: raw.to_string(),
        });
    }
    Ok(Segment::Static(raw.to_string()))
}

fn check_name(segment: &str, name: &str) -> Result<String, TemplateError> {
    if name.is_empty() {
        return Err(TemplateError::EmptyName {
            segment: segment.to_string(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(TemplateError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let template = PathTemplate::parse("/").unwrap();
        assert!(template.is_root());
        assert_eq!(template.to_string(), "/");
    }

    #[test]
    fn test_colon_and_brace_params_normalise() {
        let colon = PathTemplate::parse("/users/:id").unwrap();
        let brace = PathTemplate::parse("/users/{id}").unwrap();
        assert_eq!(colon, brace);
    }

    #[test]
    fn test_wildcard_must_be_last() {
        assert_eq!(
            PathTemplate::parse("/files/*path/meta"),
            Err(TemplateError::WildcardNotLast {
                name: "path".into()
            })
        );
        assert!(PathTemplate::parse("/files/*path")
            .unwrap()
            .has_wildcard());
    }

    #[test]
    fn test_rejects_malformed_segments() {
        assert_eq!(
            PathTemplate::parse("users"),
            Err(TemplateError::MissingLeadingSlash)
        );
        assert!(matches!(
            PathTemplate::parse("/users/{}"),
            Err(TemplateError::EmptyName { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/users/{id"),
            Err(TemplateError::UnbalancedBraces { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/users/a}b"),
            Err(TemplateError::UnbalancedBraces { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/users/:user.id"),
            Err(TemplateError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        assert_eq!(
            PathTemplate::parse("/a/{id}/b/:id"),
            Err(TemplateError::DuplicateParam { name: "id".into() })
        );
    }

    #[test]
    fn test_join_prefix() {
        let prefix = PathTemplate::parse("/api/v1").unwrap();
        let path = PathTemplate::parse("/users/{id}").unwrap();
        assert_eq!(
            prefix.join(&path).unwrap().to_string(),
            "/api/v1/users/{id}"
        );
        assert_eq!(
            prefix.join(&PathTemplate::root()).unwrap().to_string(),
            "/api/v1"
        );
    }

    #[test]
    fn test_join_rejects_duplicate_across_prefix() {
        let prefix = PathTemplate::parse("/tenants/{id}").unwrap();
        let path = PathTemplate::parse("/users/{id}").unwrap();
        assert!(matches!(
            prefix.join(&path),
            Err(TemplateError::DuplicateParam { .. })
        ));
    }
}
