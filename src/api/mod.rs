//! HTTP API: the users routes plus health, metrics and OpenAPI endpoints.

pub mod docs;
pub mod handlers;
pub mod routes;

pub use docs::ApiDoc;
pub use handlers::AppState;
pub use routes::{create_router, openapi_router};
