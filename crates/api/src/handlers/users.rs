//! Profile handlers: the caller's own profile and public profiles.

use axum::extract::State;
use axum::Json;
use lendly_core::error::CoreError;
use lendly_core::geo::validate_coordinates;
use lendly_core::types::DbId;
use lendly_db::models::user::{UpdateProfile, UserProfile};
use lendly_db::repositories::UserRepo;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/users/profile
pub async fn get_own_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let profile = UserRepo::find_profile(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Account no longer exists".to_string()))?;
    Ok(Json(json!({ "user": profile })))
}

/// PUT /api/users/profile
///
/// Partial update of the caller's own profile. Moving the home location
/// changes where future listings appear in discovery; existing listings keep
/// their coordinates.
pub async fn update_own_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<UpdateProfile>,
) -> AppResult<Json<serde_json::Value>> {
    // Coordinates may be updated independently, but each supplied value must
    // be in range.
    if let Some(lng) = input.lng {
        if let Err(msg) = validate_coordinates(lng, input.lat.unwrap_or(0.0)) {
            return Err(AppError::validation_field("lng", msg));
        }
    }
    if let Some(lat) = input.lat {
        if let Err(msg) = validate_coordinates(input.lng.unwrap_or(0.0), lat) {
            return Err(AppError::validation_field("lat", msg));
        }
    }

    let updated = UserRepo::update_profile(&state.pool, user.user_id, &input)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Account no longer exists".to_string()))?;

    Ok(Json(json!({ "user": UserProfile::from(updated) })))
}

/// GET /api/users/{id}
///
/// Public profile lookup.
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let profile = UserRepo::find_profile(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(Json(json!({ "user": profile })))
}
