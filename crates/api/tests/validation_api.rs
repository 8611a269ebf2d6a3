//! Discovery parameter validation: every malformed query must come back as
//! 400 with the standard JSON error shape, before any database work.

mod common;

use axum::http::StatusCode;

use common::{assert_error_shape, auth_token, build_test_app, get, post_json_with_token};

#[tokio::test]
async fn latitude_out_of_range_is_rejected() {
    let app = build_test_app();
    let response = get(app, "/api/items?lat=95.0&lng=-122.4").await;
    let json = assert_error_shape(response, StatusCode::BAD_REQUEST).await;
    let errors = json["errors"].as_array().expect("itemized errors expected");
    assert!(errors.iter().any(|e| e["field"] == "lat"));
}

#[tokio::test]
async fn longitude_out_of_range_is_rejected() {
    let app = build_test_app();
    let response = get(app, "/api/items?lat=37.7&lng=200.0").await;
    let json = assert_error_shape(response, StatusCode::BAD_REQUEST).await;
    let errors = json["errors"].as_array().expect("itemized errors expected");
    assert!(errors.iter().any(|e| e["field"] == "lng"));
}

#[tokio::test]
async fn radius_out_of_range_is_rejected() {
    let app = build_test_app();

    let response = get(build_test_app(), "/api/items?lat=37.7&lng=-122.4&radius=100").await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;

    let response = get(app, "/api/items?lat=37.7&lng=-122.4&radius=0.01").await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn limit_above_max_is_rejected() {
    let app = build_test_app();
    let response = get(app, "/api/items?limit=100").await;
    let json = assert_error_shape(response, StatusCode::BAD_REQUEST).await;
    let errors = json["errors"].as_array().expect("itemized errors expected");
    assert!(errors.iter().any(|e| e["field"] == "limit"));
}

#[tokio::test]
async fn zero_page_is_rejected() {
    let app = build_test_app();
    let response = get(app, "/api/items?page=0").await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn latitude_without_longitude_is_rejected() {
    let app = build_test_app();
    let response = get(app, "/api/items?lat=37.7").await;
    let json = assert_error_shape(response, StatusCode::BAD_REQUEST).await;
    let errors = json["errors"].as_array().expect("itemized errors expected");
    assert!(errors.iter().any(|e| e["field"] == "location"));
}

#[tokio::test]
async fn longitude_without_latitude_is_rejected() {
    let app = build_test_app();
    let response = get(app, "/api/items?lng=-122.4").await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn unparsable_query_value_is_rejected() {
    let app = build_test_app();
    let response = get(app, "/api/items?lat=north").await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let app = build_test_app();
    let response = get(app, "/api/items?category=Spaceships").await;
    assert_error_shape(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn item_creation_rejects_bad_image_urls() {
    let app = build_test_app();
    let token = auth_token(1);
    let start = (chrono::Utc::now() + chrono::Duration::days(1)).to_rfc3339();
    let body = format!(
        r#"{{
            "title": "Cordless drill",
            "description": "Lightly used, comes with two batteries",
            "category": "Electronics",
            "condition": "Good",
            "type": "lend",
            "images": ["ftp://example.com/drill.jpg", "https://example.com/drill.exe"],
            "availability": {{ "start_date": "{start}" }}
        }}"#
    );

    let response = post_json_with_token(app, "/api/items", &token, &body).await;
    let json = assert_error_shape(response, StatusCode::BAD_REQUEST).await;
    let errors = json["errors"].as_array().expect("itemized errors expected");
    assert_eq!(
        errors.iter().filter(|e| e["field"] == "images").count(),
        2,
        "each bad URL must be itemized: {json}"
    );
}
