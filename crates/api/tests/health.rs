mod common;

use axum::http::StatusCode;

use common::{body_json, build_test_app, get};

#[tokio::test]
async fn health_returns_ok_without_database() {
    let app = build_test_app();
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = build_test_app();
    let response = get(app, "/api/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
