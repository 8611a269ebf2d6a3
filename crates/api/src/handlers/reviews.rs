//! Review handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lendly_core::error::CoreError;
use lendly_core::types::DbId;
use lendly_db::models::review::CreateReview;
use lendly_db::repositories::{ReviewRepo, UserRepo};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum review comment length in characters.
const MAX_COMMENT_LEN: usize = 1000;

/// POST /api/reviews
///
/// Post a review for another user. The reviewee's trust score is recomputed
/// from the full review set as part of the write.
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateReview>,
) -> AppResult<impl IntoResponse> {
    if !(1..=5).contains(&input.rating) {
        return Err(AppError::validation_field(
            "rating",
            "Rating must be between 1 and 5",
        ));
    }
    if input.comment.trim().is_empty() {
        return Err(AppError::validation_field("comment", "Comment is required"));
    }
    if input.comment.chars().count() > MAX_COMMENT_LEN {
        return Err(AppError::validation_field(
            "comment",
            format!("Comment must be at most {MAX_COMMENT_LEN} characters"),
        ));
    }
    if input.reviewee_id == user.user_id {
        return Err(AppError::validation_field(
            "reviewee_id",
            "You cannot review yourself",
        ));
    }

    UserRepo::find_profile(&state.pool, input.reviewee_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: input.reviewee_id,
        })?;

    let review = ReviewRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        review_id = review.id,
        reviewee_id = review.reviewee_id,
        "Review posted"
    );
    Ok((StatusCode::CREATED, Json(json!({ "review": review }))))
}

/// GET /api/reviews/{user_id}
///
/// All reviews a user has received, newest first.
pub async fn list_user_reviews(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    UserRepo::find_profile(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;

    let reviews = ReviewRepo::list_for_user(&state.pool, id).await?;
    Ok(Json(json!({ "reviews": reviews })))
}
