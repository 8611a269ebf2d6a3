//! Direct messaging handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lendly_core::error::CoreError;
use lendly_core::message::validate_content;
use lendly_core::types::DbId;
use lendly_db::models::message::CreateMessage;
use lendly_db::repositories::{ItemRepo, MessageRepo, UserRepo};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateMessage>,
) -> AppResult<impl IntoResponse> {
    if let Err(msg) = validate_content(&input.content) {
        return Err(AppError::validation_field("content", msg));
    }
    if input.recipient_id == user.user_id {
        return Err(AppError::validation_field(
            "recipient_id",
            "You cannot message yourself",
        ));
    }

    // The recipient, and the referenced item if any, must exist.
    UserRepo::find_profile(&state.pool, input.recipient_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: input.recipient_id,
        })?;
    if let Some(item_id) = input.item_id {
        ItemRepo::find_by_id(&state.pool, item_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Item",
                id: item_id,
            })?;
    }

    let message = MessageRepo::create(&state.pool, user.user_id, &input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": message }))))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ConversationParams {
    #[validate(range(min = 1, max = 500, message = "Limit must be between 1 and 500"))]
    pub limit: Option<i64>,
}

/// Default number of messages returned per conversation fetch.
const DEFAULT_CONVERSATION_LIMIT: i64 = 100;

/// GET /api/messages/{user_id}
///
/// The two-way thread between the caller and another user, oldest first.
/// Fetching it marks the other user's messages to the caller as read.
pub async fn get_conversation(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(other_id): AppPath<DbId>,
    AppQuery(params): AppQuery<ConversationParams>,
) -> AppResult<Json<serde_json::Value>> {
    params.validate()?;

    UserRepo::find_profile(&state.pool, other_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: other_id,
        })?;

    MessageRepo::mark_read(&state.pool, user.user_id, other_id).await?;

    let limit = params.limit.unwrap_or(DEFAULT_CONVERSATION_LIMIT);
    let messages = MessageRepo::conversation(&state.pool, user.user_id, other_id, limit).await?;

    Ok(Json(json!({ "messages": messages })))
}
