//! Item request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lendly_core::error::CoreError;
use lendly_core::listing::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use lendly_core::search::{clamp_page, clamp_page_size, offset_for_page};
use lendly_core::types::DbId;
use lendly_db::models::item::Category;
use lendly_db::models::request::{CreateRequest, RequestStatus};
use lendly_db::repositories::RequestRepo;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult, FieldError};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::Pagination;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RequestListParams {
    pub status: Option<RequestStatus>,
    pub category: Option<Category>,
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 50, message = "Limit must be between 1 and 50"))]
    pub limit: Option<i64>,
}

/// GET /api/requests
pub async fn list_requests(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<RequestListParams>,
) -> AppResult<Json<serde_json::Value>> {
    params.validate()?;

    let limit = clamp_page_size(params.limit);
    let page = clamp_page(params.page);
    let offset = offset_for_page(page, limit);

    let (requests, total) = tokio::try_join!(
        RequestRepo::list(&state.pool, params.status, params.category, limit, offset),
        RequestRepo::count(&state.pool, params.status, params.category),
    )?;

    Ok(Json(json!({
        "requests": requests,
        "pagination": Pagination::new(page, limit, total),
    })))
}

/// POST /api/requests
pub async fn create_request(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateRequest>,
) -> AppResult<impl IntoResponse> {
    let mut errors = Vec::new();
    if input.title.trim().is_empty() {
        errors.push(FieldError {
            field: "title".to_string(),
            message: "Title is required".to_string(),
        });
    } else if input.title.chars().count() > MAX_TITLE_LEN {
        errors.push(FieldError {
            field: "title".to_string(),
            message: format!("Title must be at most {MAX_TITLE_LEN} characters"),
        });
    }
    if input.description.trim().is_empty() {
        errors.push(FieldError {
            field: "description".to_string(),
            message: "Description is required".to_string(),
        });
    } else if input.description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.push(FieldError {
            field: "description".to_string(),
            message: format!("Description must be at most {MAX_DESCRIPTION_LEN} characters"),
        });
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let request = RequestRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(request_id = request.id, "Request posted");
    Ok((StatusCode::CREATED, Json(json!({ "request": request }))))
}

/// GET /api/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Request",
            id,
        })?;
    Ok(Json(json!({ "request": request })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: RequestStatus,
}

/// PUT /api/requests/{id}/status
///
/// Requester-only status transition (open, fulfilled, closed).
pub async fn update_request_status(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(body): AppJson<UpdateStatusBody>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Request",
            id,
        })?;
    if existing.requester_id != user.user_id {
        return Err(
            CoreError::Forbidden("You can only update your own requests".to_string()).into(),
        );
    }

    let request = RequestRepo::update_status(&state.pool, id, body.status)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Request",
            id,
        })?;

    Ok(Json(json!({ "request": request })))
}
