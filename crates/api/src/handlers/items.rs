//! Item handlers: discovery search, CRUD, and borrow/return transitions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use lendly_core::error::CoreError;
use lendly_core::geo::{clamp_radius_km, km_to_m};
use lendly_core::listing::{
    is_valid_image_url, validate_availability, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN,
};
use lendly_core::search::{build_tsquery, clamp_page, clamp_page_size, offset_for_page};
use lendly_core::types::{DbId, Timestamp};
use lendly_db::models::item::{
    Category, Condition, CreateItem, GeoFilter, Item, ItemFilter, ItemStatus, ItemWithOwner,
    ListingType, UpdateItem,
};
use lendly_db::repositories::{ItemRepo, UserRepo};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult, FieldError};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::Pagination;
use crate::state::AppState;

fn field(name: &str, message: impl Into<String>) -> FieldError {
    FieldError {
        field: name.to_string(),
        message: message.into(),
    }
}

/// Shared field checks for item titles and descriptions.
fn check_text_fields(title: Option<&str>, description: Option<&str>, errors: &mut Vec<FieldError>) {
    if let Some(title) = title {
        if title.trim().is_empty() {
            errors.push(field("title", "Title is required"));
        } else if title.chars().count() > MAX_TITLE_LEN {
            errors.push(field(
                "title",
                format!("Title must be at most {MAX_TITLE_LEN} characters"),
            ));
        }
    }
    if let Some(description) = description {
        if description.trim().is_empty() {
            errors.push(field("description", "Description is required"));
        } else if description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(field(
                "description",
                format!("Description must be at most {MAX_DESCRIPTION_LEN} characters"),
            ));
        }
    }
}

/// Image URLs must be http(s) and end in a supported image extension.
fn check_images(images: &[String], errors: &mut Vec<FieldError>) {
    for url in images {
        if !is_valid_image_url(url) {
            errors.push(field("images", format!("Invalid image URL: {url}")));
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct DiscoverParams {
    /// Free-text query matched against title, description, and tags.
    pub search: Option<String>,
    pub category: Option<Category>,
    #[serde(rename = "type")]
    pub item_type: Option<ListingType>,
    pub condition: Option<Condition>,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: Option<f64>,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub lng: Option<f64>,
    /// Search radius in kilometers.
    #[validate(range(min = 0.1, max = 50.0, message = "Radius must be between 0.1 and 50 km"))]
    pub radius: Option<f64>,
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 50, message = "Limit must be between 1 and 50"))]
    pub limit: Option<i64>,
}

/// GET /api/items
///
/// Discovery search over available listings. Results are sorted by distance
/// when an origin is supplied, by text relevance when only a search query is
/// supplied, and by recency otherwise. Signed-in callers never see their own
/// listings.
pub async fn list_items(
    State(state): State<AppState>,
    OptionalAuthUser(auth): OptionalAuthUser,
    AppQuery(params): AppQuery<DiscoverParams>,
) -> AppResult<Json<serde_json::Value>> {
    params.validate()?;

    let origin = match (params.lng, params.lat) {
        (Some(lng), Some(lat)) => Some(GeoFilter {
            lng,
            lat,
            radius_m: km_to_m(clamp_radius_km(params.radius)),
        }),
        (None, None) => None,
        _ => {
            return Err(AppError::validation_field(
                "location",
                "lat and lng must be supplied together",
            ))
        }
    };

    let limit = clamp_page_size(params.limit);
    let page = clamp_page(params.page);
    let filter = ItemFilter {
        category: params.category,
        item_type: params.item_type,
        condition: params.condition,
        tsquery: params.search.as_deref().and_then(build_tsquery),
        origin,
        exclude_owner: auth.map(|u| u.user_id),
        limit,
        offset: offset_for_page(page, limit),
    };

    let (rows, total) = tokio::try_join!(
        ItemRepo::search(&state.pool, &filter),
        ItemRepo::count(&state.pool, &filter),
    )?;

    let items: Vec<ItemWithOwner> = rows.into_iter().map(Into::into).collect();
    Ok(Json(json!({
        "items": items,
        "pagination": Pagination::new(page, limit, total),
    })))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/items/{id}
///
/// Fetch a single listing with its owner summary and bump the view counter.
pub async fn get_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let row = ItemRepo::find_with_owner(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Item", id })?;

    ItemRepo::increment_views(&state.pool, id).await?;

    let mut item = ItemWithOwner::from(row);
    item.item.views += 1;
    Ok(Json(json!({ "item": item })))
}

/// POST /api/items
///
/// Create a listing at the owner's stored location and bump their
/// items-shared counter.
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateItem>,
) -> AppResult<impl IntoResponse> {
    let mut errors = Vec::new();
    check_text_fields(
        Some(input.title.as_str()),
        Some(input.description.as_str()),
        &mut errors,
    );
    check_images(&input.images, &mut errors);
    if let Err(msg) = validate_availability(
        input.availability.start_date,
        input.availability.end_date,
        Utc::now(),
    ) {
        errors.push(field("availability", msg));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let owner = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Account no longer exists".to_string()))?;

    let item = ItemRepo::create(&state.pool, owner.id, owner.lng, owner.lat, &input).await?;
    UserRepo::increment_items_shared(&state.pool, owner.id).await?;

    tracing::info!(item_id = item.id, owner_id = owner.id, "Item listed");

    Ok((StatusCode::CREATED, Json(json!({ "item": item }))))
}

/// PUT /api/items/{id}
///
/// Owner-only partial update.
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateItem>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = find_active(&state, id).await?;
    if existing.owner_id != user.user_id {
        return Err(
            CoreError::Forbidden("You can only modify your own listings".to_string()).into(),
        );
    }

    let mut errors = Vec::new();
    check_text_fields(input.title.as_deref(), input.description.as_deref(), &mut errors);
    if let Some(images) = &input.images {
        check_images(images, &mut errors);
    }
    if let Some(availability) = &input.availability {
        if let Err(msg) =
            validate_availability(availability.start_date, availability.end_date, Utc::now())
        {
            errors.push(field("availability", msg));
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let item = ItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "Item", id })?;

    Ok(Json(json!({ "item": item })))
}

/// DELETE /api/items/{id}
///
/// Owner-only soft delete. The row stays for history; it just disappears
/// from discovery and lookups.
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = find_active(&state, id).await?;
    if existing.owner_id != user.user_id {
        return Err(
            CoreError::Forbidden("You can only remove your own listings".to_string()).into(),
        );
    }

    ItemRepo::soft_delete(&state.pool, id).await?;

    tracing::info!(item_id = id, "Item removed");
    Ok(Json(json!({ "message": "Item removed" })))
}

/// POST /api/items/{id}/favorite
pub async fn favorite_item(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let favorites = ItemRepo::increment_favorites(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Item", id })?;
    Ok(Json(json!({ "favorites": favorites })))
}

// ---------------------------------------------------------------------------
// Owner listings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct OwnerListParams {
    pub status: Option<ItemStatus>,
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 50, message = "Limit must be between 1 and 50"))]
    pub limit: Option<i64>,
}

/// GET /api/items/user/{user_id}
///
/// A user's active listings, newest first.
pub async fn list_user_items(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
    AppQuery(params): AppQuery<OwnerListParams>,
) -> AppResult<Json<serde_json::Value>> {
    params.validate()?;

    let limit = clamp_page_size(params.limit);
    let page = clamp_page(params.page);
    let offset = offset_for_page(page, limit);

    let (rows, total) = tokio::try_join!(
        ItemRepo::list_by_owner(&state.pool, user_id, params.status, limit, offset),
        ItemRepo::count_by_owner(&state.pool, user_id, params.status),
    )?;

    let items: Vec<ItemWithOwner> = rows.into_iter().map(Into::into).collect();
    Ok(Json(json!({
        "items": items,
        "pagination": Pagination::new(page, limit, total),
    })))
}

// ---------------------------------------------------------------------------
// Borrow / return
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct BorrowBody {
    pub return_by: Option<Timestamp>,
}

/// POST /api/items/{id}/borrow
///
/// Mark an available listing as borrowed by the caller. Losing a concurrent
/// race surfaces as 409.
pub async fn borrow_item(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(body): AppJson<BorrowBody>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = find_active(&state, id).await?;
    if existing.owner_id == user.user_id {
        return Err(CoreError::Forbidden("You cannot borrow your own item".to_string()).into());
    }

    let item = ItemRepo::borrow(&state.pool, id, user.user_id, body.return_by)
        .await?
        .ok_or_else(|| CoreError::Conflict("Item is not available".to_string()))?;

    tracing::info!(item_id = id, borrower_id = user.user_id, "Item borrowed");
    Ok(Json(json!({ "item": item })))
}

/// POST /api/items/{id}/return
///
/// Mark a borrowed listing as returned. Either party may do it; a completed
/// exchange is recorded on both profiles.
pub async fn return_item(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = find_active(&state, id).await?;
    if existing.owner_id != user.user_id && existing.borrowed_by != Some(user.user_id) {
        return Err(CoreError::Forbidden(
            "Only the owner or the borrower can return this item".to_string(),
        )
        .into());
    }

    let item = ItemRepo::mark_returned(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::Conflict("Item is not currently borrowed".to_string()))?;

    if let Some(borrower_id) = existing.borrowed_by {
        UserRepo::record_exchange(&state.pool, existing.owner_id, borrower_id).await?;
    }

    tracing::info!(item_id = id, "Item returned");
    Ok(Json(json!({ "item": item })))
}

/// Fetch an item, treating missing and soft-deleted rows as 404.
async fn find_active(state: &AppState, id: DbId) -> AppResult<Item> {
    let item = ItemRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|i| i.is_active)
        .ok_or(CoreError::NotFound { entity: "Item", id })?;
    Ok(item)
}
