//! Error-shape contract tests for routing and path parsing.

mod common;

use axum::http::StatusCode;

use common::{assert_error_shape, build_test_app, get, post_json};

#[tokio::test]
async fn non_numeric_item_id_is_400() {
    let app = build_test_app();
    let response = get(app, "/api/items/not-a-number").await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn non_numeric_user_id_is_400() {
    let app = build_test_app();
    let response = get(app, "/api/users/abc").await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn unrouted_subpath_is_404() {
    let app = build_test_app();
    let response = post_json(app, "/api/items/42/status", "{}").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_method_is_405() {
    let app = build_test_app();
    let response = post_json(app, "/health", "{}").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn login_rejects_malformed_json() {
    let app = build_test_app();
    let response = post_json(app, "/api/auth/login", "not json at all").await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn login_rejects_missing_fields() {
    let app = build_test_app();
    let response = post_json(app, "/api/auth/login", r#"{"email": "a@b.com"}"#).await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;
}
