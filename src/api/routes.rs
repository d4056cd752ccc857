//! HTTP API route definitions.

use axum::{
    http::Method,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::routes::RouteConfig;

use super::handlers::{
    add_user, delete_user, get_user, health, list_users, openapi, render_metrics, search_users,
    update_user, AppState,
};

/// Create the API router.
///
/// The users collection serves the methods its [`RouteConfig`] declares;
/// anything else on that path answers 405.
pub fn create_router(state: AppState) -> Router {
    let users_route = state.users_route.clone();

    Router::new()
        // Health and metrics
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        // Users
        .route(users_route.path(), users_methods(&users_route))
        .route("/users/search", get(search_users))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Method router for the users collection, built from its declared methods.
fn users_methods(route: &RouteConfig) -> MethodRouter<AppState> {
    route
        .allowed_methods()
        .into_iter()
        .fold(MethodRouter::new(), |router, method| match method {
            Method::GET => router.get(list_users),
            Method::POST => router.post(add_user),
            other => {
                warn!(method = %other, path = route.path(), "No controller for declared method");
                router
            }
        })
}

/// Router serving the OpenAPI document.
pub fn openapi_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi))
}
