//! OpenAPI document for the HTTP API.

use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::users::{User, UserPatch};

use super::handlers::{self, AddUserBody, DeletedResponse, HealthResponse};

/// OpenAPI description of every documented route.
#[derive(OpenApi)]
#[openapi(
    info(title = "users-api", description = "Example users route and in-memory user service"),
    paths(
        handlers::health,
        handlers::list_users,
        handlers::add_user,
        handlers::search_users,
        handlers::get_user,
        handlers::update_user,
        handlers::delete_user,
    ),
    components(schemas(User, UserPatch, AddUserBody, DeletedResponse, HealthResponse, ErrorBody)),
    tags(
        (name = "users", description = "User management"),
        (name = "system", description = "Service health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_user_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for expected in ["/health", "/users", "/users/search", "/users/{id}"] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected}");
        }
    }
}
