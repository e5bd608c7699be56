//! Explicit endpoint registration.
//!
//! A [`RouteTable`] binds compiled endpoint definitions to handler values
//! and answers lookups by verb and concrete path.

use http::Method;
use waymark_options::{CompiledRoute, HttpMethod, RouteCompiler, RouteOptions};

use crate::node::{InsertError, Node};
use crate::template::PathTemplate;
use crate::{Params, RouterError, RouterResult};

/// Declarative description of one endpoint.
///
/// # Example
///
/// ```rust
/// use waymark_options::RouteOptions;
/// use waymark_router::EndpointDef;
///
/// let def = EndpointDef::new("listUsers")
///     .with_preset("crud.list")
///     .with_options(RouteOptions {
///         path: Some("/users".into()),
///         ..Default::default()
///     });
///
/// assert_eq!(def.id(), "listUsers");
/// assert_eq!(def.preset(), Some("crud.list"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EndpointDef {
    id: String,
    preset: Option<String>,
    options: RouteOptions,
}

impl EndpointDef {
    /// An endpoint with no preset and empty options.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            preset: None,
            options: RouteOptions::default(),
        }
    }

    /// Sets the preset name.
    #[must_use]
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    /// Sets the user options.
    #[must_use]
    pub fn with_options(mut self, options: RouteOptions) -> Self {
        self.options = options;
        self
    }

    /// Endpoint identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Requested preset.
    pub fn preset(&self) -> Option<&str> {
        self.preset.as_deref()
    }

    /// User options.
    pub fn options(&self) -> &RouteOptions {
        &self.options
    }
}

/// An endpoint accepted by a [`RouteTable`].
#[derive(Debug, Clone)]
pub struct RegisteredEndpoint<H> {
    id: String,
    method: HttpMethod,
    path: PathTemplate,
    route: CompiledRoute,
    handler: H,
}

impl<H> RegisteredEndpoint<H> {
    /// Endpoint identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Bound verb.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Bound path template, prefix included.
    pub fn path(&self) -> &PathTemplate {
        &self.path
    }

    /// Compiled options.
    pub fn route(&self) -> &CompiledRoute {
        &self.route
    }

    /// The bound handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Result of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// The matched endpoint.
    pub endpoint: &'a RegisteredEndpoint<H>,
    /// Captured path parameters.
    pub params: Params,
}

/// Registration table of compiled endpoints.
///
/// # Example
///
/// ```rust
/// use waymark_options::{HttpMethod, RouteOptions};
/// use waymark_router::{EndpointDef, RouteTable};
///
/// let mut table = RouteTable::new().with_prefix("/api")?;
/// table.register(
///     EndpointDef::new("getUser").with_preset("crud.get").with_options(RouteOptions {
///         path: Some("/users/:id".into()),
///         ..Default::default()
///     }),
///     "get_user_handler",
/// )?;
///
/// let found = table.find(HttpMethod::Get, "/api/users/42").unwrap();
/// assert_eq!(found.endpoint.id(), "getUser");
/// assert_eq!(*found.endpoint.handler(), "get_user_handler");
/// assert_eq!(found.params.get("id"), Some("42"));
/// # Ok::<(), waymark_router::RouterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    compiler: RouteCompiler,
    prefix: PathTemplate,
    root: Node<usize>,
    endpoints: Vec<RegisteredEndpoint<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTable<H> {
    /// An empty table using the default compiler.
    pub fn new() -> Self {
        Self::with_compiler(RouteCompiler::new())
    }

    /// An empty table using `compiler`.
    pub fn with_compiler(compiler: RouteCompiler) -> Self {
        Self {
            compiler,
            prefix: PathTemplate::root(),
            root: Node::default(),
            endpoints: Vec::new(),
        }
    }

    /// Mounts every endpoint registered afterwards under `prefix`.
    pub fn with_prefix(mut self, prefix: &str) -> RouterResult<Self> {
        self.prefix = PathTemplate::parse(prefix)
            .map_err(|err| RouterError::invalid_path("<prefix>", prefix, err))?;
        Ok(self)
    }

    /// The compiler used for registration.
    pub fn compiler(&self) -> &RouteCompiler {
        &self.compiler
    }

    /// Compiles `def` and binds it to `handler`.
    ///
    /// The verb defaults to `GET` and the path to `/`. Nothing is stored
    /// when compilation or path validation fails.
    pub fn register(&mut self, def: EndpointDef, handler: H) -> RouterResult<&RegisteredEndpoint<H>> {
        let EndpointDef { id, preset, options } = def;

        let route = self
            .compiler
            .compile_endpoint(&id, preset.as_deref(), options)
            .map_err(|err| RouterError::compile(&id, err))?;

        let method = route.method();
        let raw_path = route.path().unwrap_or("/");
        let path = PathTemplate::parse(raw_path)
            .and_then(|template| self.prefix.join(&template))
            .map_err(|err| RouterError::invalid_path(&id, raw_path, err))?;

        let index = self.endpoints.len();
        match self.root.insert(&path, method, index) {
            Ok(()) => {}
            Err(InsertError::Occupied(existing)) => {
                return Err(RouterError::DuplicateRoute {
                    endpoint: id,
                    method,
                    path: path.to_string(),
                    existing: self.endpoints[existing].id.clone(),
                });
            }
            Err(InsertError::ParamName {
                existing,
                requested,
            }) => {
                return Err(RouterError::invalid_path(
                    &id,
                    raw_path,
                    format!("parameter '{requested}' conflicts with '{existing}' at the same position"),
                ));
            }
        }

        tracing::debug!(
            endpoint = %id,
            method = %method,
            path = %path,
            preset = route.preset().unwrap_or("<none>"),
            "Registered endpoint"
        );

        self.endpoints.push(RegisteredEndpoint {
            id,
            method,
            path,
            route,
            handler,
        });
        Ok(&self.endpoints[index])
    }

    /// Finds the endpoint serving `method` at a concrete `path`.
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<RouteMatch<'_, H>> {
        let (&index, params) = self.root.find(method, path)?;
        Some(RouteMatch {
            endpoint: &self.endpoints[index],
            params,
        })
    }

    /// [`find`](Self::find) for an `http` request method.
    pub fn find_http(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        let method = HttpMethod::try_from(method).ok()?;
        self.find(method, path)
    }

    /// Verbs some endpoint serves at a concrete `path`; empty when nothing
    /// matches.
    pub fn allowed_methods(&self, path: &str) -> Vec<HttpMethod> {
        self.root.allowed_methods(path)
    }

    /// Endpoint registered under `id`.
    pub fn get(&self, id: &str) -> Option<&RegisteredEndpoint<H>> {
        self.endpoints.iter().find(|endpoint| endpoint.id == id)
    }

    /// Endpoints in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredEndpoint<H>> {
        self.endpoints.iter()
    }

    /// Number of registered endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
