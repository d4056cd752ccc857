//! End-to-end tests over the router and the user store.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use users_api::api::{create_router, AppState};
use users_api::users::{seed_users, UserStore, SEED_COUNT};
use users_api::ErrorCode;

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn full_user_lifecycle() {
    let state = AppState::new();
    let app = || create_router(state.clone());

    let (status, users) = send(app(), "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), SEED_COUNT);

    let (status, zoe) = send(app(), "POST", "/users", Some(json!({"name": "Zoe", "age": 30}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(zoe, json!({"id": "14", "name": "Zoe", "age": 30}));

    let (_, found) = send(app(), "GET", "/users/search?q=zo", None).await;
    assert_eq!(found, json!([zoe]));

    let (status, updated) = send(app(), "PATCH", "/users/14", Some(json!({"name": "Zoey"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": "14", "name": "Zoey", "age": 30}));

    let (status, deleted) = send(app(), "DELETE", "/users/14", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"id": "14"}));

    let (status, err) = send(app(), "GET", "/users/14", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], ErrorCode::PathNotFound.to_string());
}

#[tokio::test]
async fn emptied_store_reseeds_on_next_request() {
    let state = AppState::new();

    for user in seed_users() {
        let (status, _) = send(
            create_router(state.clone()),
            "DELETE",
            &format!("/users/{}", user.id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    assert!(state.store.read().await.is_empty());

    let (_, users) = send(create_router(state.clone()), "GET", "/users", None).await;
    assert_eq!(users.as_array().unwrap().len(), SEED_COUNT);
}

#[tokio::test]
async fn post_keeps_age_exactly_or_rejects_it() {
    let state = AppState::new();

    let (status, created) = send(
        create_router(state.clone()),
        "POST",
        "/users",
        Some(json!({"name": "Ann"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, json!({"id": "14", "name": "Ann"}));

    let (status, err) = send(
        create_router(state.clone()),
        "POST",
        "/users",
        Some(json!({"name": "Big", "age": 1e30})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "OriginalRequestNotValid");

    let (_, users) = send(create_router(state), "GET", "/users", None).await;
    assert_eq!(users.as_array().unwrap().len(), SEED_COUNT + 1);
}

#[tokio::test]
async fn empty_post_body_is_invalid_user_data() {
    let app = create_router(AppState::new());

    let (status, err) = send(app, "POST", "/users", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        err,
        json!({"message": "Invalid user data", "code": "OriginalRequestNotValid"})
    );
}

#[test]
fn store_satisfies_seed_and_update_contract() {
    let mut store = UserStore::new();

    assert_eq!(store.get_users(), seed_users());

    let before = store.get_user("9").unwrap();
    let after = store.update_user("9", &json!({"age": 99, "nickname": "Chuck"})).unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.name, before.name);
    assert_eq!(after.age, Some(99));
}
