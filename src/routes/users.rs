//! Route configuration for `/users`.

use axum::http::Method;

use super::config::{MethodConfig, RouteConfig};
use super::schema::{BodySchema, FieldSpec, FieldType};

/// Path of the users collection.
pub const USERS_PATH: &str = "/users";

/// `GET` lists users. `POST` adds one from an optional string `name` and an
/// optional number `age`.
pub fn users_config() -> RouteConfig {
    RouteConfig::new(USERS_PATH)
        .method(Method::GET, MethodConfig::without_body())
        .method(
            Method::POST,
            MethodConfig::with_body(
                BodySchema::new()
                    .field("name", FieldSpec::optional(FieldType::String))
                    .field("age", FieldSpec::optional(FieldType::Number)),
            ),
        )
}
