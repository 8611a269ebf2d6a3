//! Registration and login handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lendly_core::error::CoreError;
use lendly_core::geo::validate_coordinates;
use lendly_db::models::user::{CreateUser, UserProfile};
use lendly_db::repositories::UserRepo;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterBody {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 200, message = "Address must be 1-200 characters"))]
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/register
///
/// Creates an account and returns an access token alongside the new profile.
/// Duplicate emails are rejected with 409.
pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterBody>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;
    if let Err(msg) = validate_password_strength(&body.password) {
        return Err(AppError::validation_field("password", msg));
    }
    if let Err(msg) = validate_coordinates(body.lng, body.lat) {
        return Err(AppError::validation_field("location", msg));
    }

    if UserRepo::find_by_email(&state.pool, &body.email)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict("Email is already registered".to_string()).into());
    }

    let password_hash = hash_password(&body.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email.to_lowercase(),
            password_hash,
            address: body.address,
            lng: body.lng,
            lat: body.lat,
            bio: body.bio,
        },
    )
    .await?;

    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "token": token, "user": UserProfile::from(user) })),
    ))
}

/// POST /api/auth/login
///
/// Verifies credentials and returns a fresh access token. Unknown emails and
/// wrong passwords produce the same 401 so the endpoint does not leak which
/// accounts exist.
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginBody>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_email(&state.pool, &body.email)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid email or password".to_string()))?;

    let verified = verify_password(&body.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(CoreError::Unauthorized("Invalid email or password".to_string()).into());
    }

    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(Json(
        json!({ "token": token, "user": UserProfile::from(user) }),
    ))
}

/// GET /api/auth/me
///
/// The profile behind the presented token.
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let profile = UserRepo::find_profile(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Account no longer exists".to_string()))?;
    Ok(Json(json!({ "user": profile })))
}
