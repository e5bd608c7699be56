//! Descriptor types referenced by [`RouteOptions`](crate::RouteOptions).
//!
//! These describe the shape of an endpoint (verb, parameters, body,
//! documented responses, upload and redirect modes). They carry no
//! behaviour beyond merging and conversion to `http` types.

use std::fmt;

use http::{Method, StatusCode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::merge::{merge_fields, Merge};

/// HTTP verb of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl HttpMethod {
    /// Converts to the `http` crate method.
    pub fn as_http(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Patch => Method::PATCH,
            Self::Delete => Method::DELETE,
            Self::Head => Method::HEAD,
            Self::Options => Method::OPTIONS,
        }
    }

    /// Upper-case verb name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether the verb is safe to cache.
    pub const fn is_cacheable(self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&Method> for HttpMethod {
    type Error = Method;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        match *method {
            Method::GET => Ok(Self::Get),
            Method::POST => Ok(Self::Post),
            Method::PUT => Ok(Self::Put),
            Method::PATCH => Ok(Self::Patch),
            Method::DELETE => Ok(Self::Delete),
            Method::HEAD => Ok(Self::Head),
            Method::OPTIONS => Ok(Self::Options),
            _ => Err(method.clone()),
        }
    }
}

/// Primitive type tag of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Free text.
    #[default]
    String,
    /// Integral number.
    Integer,
    /// Any number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Repeated value.
    Array,
    /// Structured value.
    Object,
}

/// A path, query or header parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParamDescriptor {
    /// Parameter name as it appears on the wire.
    pub name: String,

    /// Type tag.
    #[serde(default, rename = "type")]
    pub param_type: ParamType,

    /// Whether the parameter must be present.
    #[serde(default)]
    pub required: bool,

    /// Documentation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON schema overriding the type tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl ParamDescriptor {
    /// An optional string parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A required string parameter.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            ..Default::default()
        }
    }

    /// Sets the type tag.
    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request body descriptor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BodyOptions {
    /// Name of the DTO type the body decodes into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dto: Option<String>,

    /// JSON schema of the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// Documentation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the body must be present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl BodyOptions {
    /// A body decoded into the named DTO.
    pub fn dto(name: impl Into<String>) -> Self {
        Self {
            dto: Some(name.into()),
            ..Default::default()
        }
    }
}

impl Merge for BodyOptions {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            replace: [dto, description, required],
            json: [schema],
        });
    }
}

/// Documented response categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseKind {
    /// 200
    Ok,
    /// 201
    Created,
    /// 202
    Accepted,
    /// 204
    NoContent,
    /// 301
    MovedPermanently,
    /// 302
    Found,
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 422
    UnprocessableEntity,
    /// 429
    TooManyRequests,
    /// 500
    InternalServerError,
    /// 503
    ServiceUnavailable,
}

impl ResponseKind {
    /// Status code documented for this category.
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::Created => StatusCode::CREATED,
            Self::Accepted => StatusCode::ACCEPTED,
            Self::NoContent => StatusCode::NO_CONTENT,
            Self::MovedPermanently => StatusCode::MOVED_PERMANENTLY,
            Self::Found => StatusCode::FOUND,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Documentation for one response category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResponseDescriptor {
    /// Documentation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Name of the response DTO type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<String>,

    /// Whether the payload is a list of `type_ref`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_array: Option<bool>,

    /// JSON schema of the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// Response headers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<ParamDescriptor>,
}

impl ResponseDescriptor {
    /// A response documented by text only.
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

impl Merge for ResponseDescriptor {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            replace: [description, type_ref, is_array],
            json: [schema],
            concat: [headers],
        });
    }
}

/// Documented responses keyed by category, in declaration order.
pub type Responses = IndexMap<ResponseKind, ResponseDescriptor>;

/// Redirect response mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RedirectOptions {
    /// Target location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Redirect status (defaults to 302 in the attachment layer).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl RedirectOptions {
    /// Redirect to `url`.
    pub fn to(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            status_code: None,
        }
    }
}

impl Merge for RedirectOptions {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            replace: [url, status_code],
        });
    }
}

/// Multipart upload descriptor, used for both single and multiple files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UploadOptions {
    /// Multipart field carrying the file(s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,

    /// Maximum number of files (multiple upload only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,

    /// Maximum size per file in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,

    /// Accepted MIME types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mime_types: Vec<String>,
}

impl UploadOptions {
    /// Upload read from the named multipart field.
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field_name: Some(name.into()),
            ..Default::default()
        }
    }
}

impl Merge for UploadOptions {
    fn merge(&mut self, incoming: Self) {
        merge_fields!(self, incoming, {
            replace: [field_name, max_count, max_size],
            concat: [mime_types],
        });
    }
}

/// Opaque reference to a guard, pipe, interceptor or filter.
///
/// The compiler never interprets these; the registration layer resolves
/// them by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MiddlewareRef(String);

impl MiddlewareRef {
    /// Creates a reference to the named middleware.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The referenced name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MiddlewareRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for MiddlewareRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
