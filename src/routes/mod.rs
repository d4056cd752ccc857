//! Declarative route configuration.
//!
//! A [`RouteConfig`] maps HTTP methods on a path to an optional body
//! [`BodySchema`]. Controllers validate incoming bodies against the schema
//! before calling into the user service.

pub mod config;
pub mod schema;
pub mod users;

pub use config::{MethodConfig, RouteConfig};
pub use schema::{BodySchema, FieldError, FieldSpec, FieldType, ValidatedBody};
pub use users::{users_config, USERS_PATH};
