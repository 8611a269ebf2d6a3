mod common;

use axum::http::StatusCode;

use common::{assert_error_shape, build_test_app, get, get_with_token, post_json};

// ---------------------------------------------------------------------------
// Protected routes reject anonymous and bad-token requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn profile_requires_token() {
    let app = build_test_app();
    let response = get(app, "/api/users/profile").await;
    assert_error_shape(response, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = build_test_app();
    let response = get_with_token(app, "/api/users/profile", "not-a-jwt").await;
    assert_error_shape(response, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn token_signed_with_wrong_secret_is_rejected() {
    let wrong = lendly_api::auth::jwt::JwtConfig {
        secret: "a-completely-different-secret".to_string(),
        access_token_expiry_mins: 60,
    };
    let token =
        lendly_api::auth::jwt::generate_access_token(1, &wrong).expect("token should generate");

    let app = build_test_app();
    let response = get_with_token(app, "/api/users/profile", &token).await;
    assert_error_shape(response, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn create_item_requires_token() {
    let app = build_test_app();
    let response = post_json(app, "/api/items", "{}").await;
    assert_error_shape(response, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn send_message_requires_token() {
    let app = build_test_app();
    let response = post_json(app, "/api/messages", "{}").await;
    assert_error_shape(response, StatusCode::UNAUTHORIZED).await;
}

// ---------------------------------------------------------------------------
// Registration input validation (checked before any database access)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_rejects_malformed_json() {
    let app = build_test_app();
    let response = post_json(app, "/api/auth/register", "{not json").await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn register_rejects_invalid_email() {
    let app = build_test_app();
    let body = r#"{
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "not-an-email",
        "password": "long-enough-password",
        "address": "12 Example St",
        "lng": -122.4194,
        "lat": 37.7749
    }"#;
    let response = post_json(app, "/api/auth/register", body).await;
    let json = assert_error_shape(response, StatusCode::BAD_REQUEST).await;
    let errors = json["errors"].as_array().expect("itemized errors expected");
    assert!(errors.iter().any(|e| e["field"] == "email"));
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = build_test_app();
    let body = r#"{
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "password": "short",
        "address": "12 Example St",
        "lng": -122.4194,
        "lat": 37.7749
    }"#;
    let response = post_json(app, "/api/auth/register", body).await;
    let json = assert_error_shape(response, StatusCode::BAD_REQUEST).await;
    let errors = json["errors"].as_array().expect("itemized errors expected");
    assert!(errors.iter().any(|e| e["field"] == "password"));
}

#[tokio::test]
async fn register_rejects_out_of_range_coordinates() {
    let app = build_test_app();
    let body = r#"{
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "password": "long-enough-password",
        "address": "12 Example St",
        "lng": -200.0,
        "lat": 37.7749
    }"#;
    let response = post_json(app, "/api/auth/register", body).await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;
}
