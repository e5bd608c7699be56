//! Explicit endpoint registration for Waymark.
//!
//! Endpoints are plain values: an identifier, an optional preset name and
//! a [`RouteOptions`](waymark_options::RouteOptions) fragment. A
//! [`RouteTable`] compiles each one, binds it to a handler value and
//! matches concrete request paths back to it.
//!
//! # Features
//!
//! - **Path Templates**: `{id}` and `:id` parameters, trailing `*rest` catch-all
//! - **Route Priority**: static segments, then parameters, then catch-alls
//! - **Duplicate Detection**: one endpoint per verb and template
//! - **Prefixes**: mount a whole table under `/api/v1`
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use waymark_options::{HttpMethod, RouteOptions};
//! use waymark_router::{EndpointDef, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table.register(
//!     EndpointDef::new("listUsers")
//!         .with_preset("crud.list")
//!         .with_options(RouteOptions::from_json(json!({"path": "/users"})).unwrap()),
//!     "list_users",
//! )?;
//! table.register(
//!     EndpointDef::new("getUser")
//!         .with_preset("crud.get")
//!         .with_options(RouteOptions::from_json(json!({"path": "/users/{id}"})).unwrap()),
//!     "get_user",
//! )?;
//!
//! let found = table.find(HttpMethod::Get, "/users/42").unwrap();
//! assert_eq!(found.endpoint.id(), "getUser");
//! assert_eq!(found.params.get("id"), Some("42"));
//! # Ok::<(), waymark_router::RouterError>(())
//! ```
//!
//! # Structure
//!
//! ```text
//!                    (root)
//!                      │
//!                   "users"
//!                      │
//!             ┌────────┴────────┐
//!          [GET]              "{id}"
//!        listUsers              │
//!                             [GET]
//!                            getUser
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod method_router;
mod node;
mod params;
mod table;
mod template;

pub use error::{RouterError, RouterResult};
pub use method_router::MethodRouter;
pub use params::Params;
pub use table::{EndpointDef, RegisteredEndpoint, RouteMatch, RouteTable};
pub use template::{PathTemplate, Segment, TemplateError};
