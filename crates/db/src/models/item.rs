//! Item entity model, enums, and DTOs.
//!
//! Items are the listings users offer for lending or donation. Rows are never
//! physically deleted; `is_active = false` marks a soft-deleted listing.

use lendly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Enums (mirrored as PostgreSQL enum types in the schema)
// ---------------------------------------------------------------------------

/// Item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_category")]
pub enum Category {
    #[serde(rename = "Tools & Equipment")]
    #[sqlx(rename = "Tools & Equipment")]
    ToolsEquipment,
    #[serde(rename = "Books & Media")]
    #[sqlx(rename = "Books & Media")]
    BooksMedia,
    Electronics,
    Furniture,
    Clothing,
    #[serde(rename = "Sports & Recreation")]
    #[sqlx(rename = "Sports & Recreation")]
    SportsRecreation,
    #[serde(rename = "Baby & Kids")]
    #[sqlx(rename = "Baby & Kids")]
    BabyKids,
    #[serde(rename = "Kitchen & Appliances")]
    #[sqlx(rename = "Kitchen & Appliances")]
    KitchenAppliances,
    #[serde(rename = "Garden & Outdoor")]
    #[sqlx(rename = "Garden & Outdoor")]
    GardenOutdoor,
    #[serde(rename = "Musical Instruments")]
    #[sqlx(rename = "Musical Instruments")]
    MusicalInstruments,
    #[serde(rename = "Art & Crafts")]
    #[sqlx(rename = "Art & Crafts")]
    ArtCrafts,
    Other,
}

/// Physical condition of a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_condition")]
pub enum Condition {
    New,
    #[serde(rename = "Like New")]
    #[sqlx(rename = "Like New")]
    LikeNew,
    Good,
    Fair,
    Poor,
}

/// Whether an item is offered for lending or as a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Lend,
    Donate,
}

/// Item lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Available,
    Borrowed,
    Unavailable,
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    #[serde(rename = "type")]
    pub item_type: ListingType,
    pub owner_id: DbId,
    pub images: Vec<String>,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub flexible: bool,
    pub lng: f64,
    pub lat: f64,
    pub status: ItemStatus,
    pub borrowed_by: Option<DbId>,
    pub borrowed_at: Option<Timestamp>,
    pub return_by: Option<Timestamp>,
    pub views: i32,
    pub favorites: i32,
    pub tags: Vec<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Owner summary columns joined onto item queries.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub trust_score: f64,
    pub total_exchanges: i32,
    pub profile_image: Option<String>,
}

/// Flat row shape produced by item queries that join the owner.
///
/// `distance_m` is populated only by the geospatial discovery branch.
#[derive(Debug, Clone, FromRow)]
pub struct ItemWithOwnerRow {
    #[sqlx(flatten)]
    pub item: Item,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_trust_score: f64,
    pub owner_total_exchanges: i32,
    pub owner_profile_image: Option<String>,
    pub distance_m: Option<f64>,
}

/// API-facing item shape: item fields plus a nested owner summary.
#[derive(Debug, Clone, Serialize)]
pub struct ItemWithOwner {
    #[serde(flatten)]
    pub item: Item,
    /// Distance in meters from the search origin, geo queries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub owner: OwnerSummary,
}

impl From<ItemWithOwnerRow> for ItemWithOwner {
    fn from(row: ItemWithOwnerRow) -> Self {
        let owner = OwnerSummary {
            id: row.item.owner_id,
            first_name: row.owner_first_name,
            last_name: row.owner_last_name,
            trust_score: row.owner_trust_score,
            total_exchanges: row.owner_total_exchanges,
            profile_image: row.owner_profile_image,
        };
        ItemWithOwner {
            item: row.item,
            distance: row.distance_m,
            owner,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Availability window supplied when creating or updating an item.
#[derive(Debug, Clone, Deserialize)]
pub struct Availability {
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    #[serde(default)]
    pub flexible: bool,
}

/// DTO for creating a new item. The location comes from the owner's stored
/// coordinates, not from the request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItem {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    #[serde(rename = "type")]
    pub item_type: ListingType,
    #[serde(default)]
    pub images: Vec<String>,
    pub availability: Availability,
}

/// DTO for updating an existing item. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub images: Option<Vec<String>>,
    pub availability: Option<Availability>,
    pub status: Option<ItemStatus>,
}

// ---------------------------------------------------------------------------
// Query filter
// ---------------------------------------------------------------------------

/// Geographic origin + radius for proximity filtering.
#[derive(Debug, Clone, Copy)]
pub struct GeoFilter {
    pub lng: f64,
    pub lat: f64,
    /// Radius in meters.
    pub radius_m: f64,
}

/// Fully-resolved filter for the item discovery query.
///
/// Built by the API layer after validation and clamping; the repository
/// consumes it as-is.
#[derive(Debug, Clone)]
pub struct ItemFilter {
    pub category: Option<Category>,
    pub item_type: Option<ListingType>,
    pub condition: Option<Condition>,
    /// Prebuilt tsquery string (see `lendly_core::search::build_tsquery`).
    pub tsquery: Option<String>,
    pub origin: Option<GeoFilter>,
    /// Authenticated requester whose own items are excluded.
    pub exclude_owner: Option<DbId>,
    pub limit: i64,
    pub offset: i64,
}
