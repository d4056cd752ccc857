//! HTTP API handlers.
//!
//! The `/users` handlers are the controllers behind [`users_config`]: bodies
//! are validated against the route's declared schema before reaching the
//! store.
//!
//! [`users_config`]: crate::routes::users_config

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::error::{ErrorBody, UserError};
use crate::metrics::{self, LatencyTimer};
use crate::routes::{users_config, RouteConfig, ValidatedBody};
use crate::users::{User, UserPatch, UserStore};

use super::docs::ApiDoc;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The user store.
    pub store: Arc<RwLock<UserStore>>,
    /// Route configuration for `/users`.
    pub users_route: Arc<RouteConfig>,
    /// Prometheus render handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state with an empty store.
    pub fn new() -> Self {
        Self::with_store(UserStore::new())
    }

    /// Create app state around an existing store.
    pub fn with_store(store: UserStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            users_route: Arc::new(users_config()),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so `/metrics` can render.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: String,
}

/// Body accepted by `POST /users`. Both fields are optional in the schema.
/// A missing or empty name is rejected by the store; a missing age is not.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddUserBody {
    /// Name of the new user.
    pub name: Option<String>,
    /// Age of the new user, a whole number of at least 1.
    pub age: Option<i64>,
}

/// Response to a successful delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    /// Id of the removed user.
    pub id: String,
}

/// Query string for `GET /users/search`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring of the name. Empty matches nothing.
    #[serde(default)]
    pub q: String,
}

/// Health check handler - always returns 200.
#[utoipa::path(get, path = "/health", tag = "system",
    responses((status = 200, description = "Service is up", body = HealthResponse)))]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Prometheus metrics in text format, or 404 without a recorder.
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// OpenAPI document.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// `GET /users`: every user.
#[utoipa::path(get, path = "/users", tag = "users",
    responses((status = 200, description = "All users", body = [User])))]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let _timer = LatencyTimer::new("list_users");
    let users = state.store.write().await.get_users();
    debug!(count = users.len(), "Listed users");
    Json(users)
}

/// `POST /users`: validate the body and add a user.
#[utoipa::path(post, path = "/users", tag = "users",
    request_body = AddUserBody,
    responses(
        (status = 200, description = "Created user", body = User),
        (status = 400, description = "Invalid body or user data", body = ErrorBody),
    ))]
#[instrument(skip(state, body))]
pub async fn add_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<User>, UserError> {
    let _timer = LatencyTimer::new("add_user");
    let Json(body) = body.map_err(reject_json)?;

    let validated = match state.users_route.body_schema(&Method::POST) {
        Some(schema) => schema.validate(&body),
        None => ValidatedBody::default(),
    };
    if !validated.is_valid() {
        warn!(errors = ?validated.errors(), "POST /users body failed validation");
        return Err(UserError::request_not_valid());
    }

    let name = validated.string("name").unwrap_or_default();
    let age = validated.integer("age").map_err(|e| {
        warn!(field = %e.field, reason = %e.reason, "POST /users age rejected");
        UserError::invalid_user_data()
    })?;

    let user = state.store.write().await.add_user(name, age)?;
    metrics::inc_users_created();
    info!(id = %user.id, name = %user.name, "User created");
    Ok(Json(user))
}

/// `GET /users/search?q=`: users whose name contains `q`.
#[utoipa::path(get, path = "/users/search", tag = "users",
    params(SearchParams),
    responses((status = 200, description = "Matching users", body = [User])))]
#[instrument(skip(state))]
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<User>> {
    let _timer = LatencyTimer::new("search_users");
    Json(state.store.write().await.search(&params.q))
}

/// `GET /users/{id}`.
#[utoipa::path(get, path = "/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "No such user", body = ErrorBody),
    ))]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, UserError> {
    let _timer = LatencyTimer::new("get_user");
    let user = state.store.write().await.get_user(&id)?;
    Ok(Json(user))
}

/// `PATCH /users/{id}`: merge known fields from the body into the user.
#[utoipa::path(patch, path = "/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
    ))]
#[instrument(skip(state, body))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<User>, UserError> {
    let _timer = LatencyTimer::new("update_user");
    let Json(payload) = body.map_err(reject_json)?;

    let user = state.store.write().await.update_user(&id, &payload)?;
    metrics::inc_users_updated();
    info!(id = %user.id, "User updated");
    Ok(Json(user))
}

/// `DELETE /users/{id}`.
#[utoipa::path(delete, path = "/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Id of the deleted user", body = DeletedResponse),
        (status = 404, description = "No such user", body = ErrorBody),
    ))]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, UserError> {
    let _timer = LatencyTimer::new("delete_user");
    let id = state.store.write().await.delete_user(&id)?;
    metrics::inc_users_deleted();
    info!(id = %id, "User deleted");
    Ok(Json(DeletedResponse { id }))
}

fn reject_json(rejection: JsonRejection) -> UserError {
    warn!("Rejected request body: {}", rejection.body_text());
    UserError::InvalidInput {
        message: rejection.body_text(),
    }
}
