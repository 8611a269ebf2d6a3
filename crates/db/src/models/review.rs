//! Review entity model and DTOs.
//!
//! Reviews feed a user's trust score: the average rating across all reviews
//! they have received, recomputed whenever a new review lands.

use lendly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub reviewer_id: DbId,
    pub reviewee_id: DbId,
    pub rating: i32,
    pub comment: String,
    pub item_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// A review joined with the reviewer's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithReviewer {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    pub reviewer_first_name: String,
    pub reviewer_last_name: String,
}

/// DTO for posting a review. The reviewer comes from the auth token.
#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub reviewee_id: DbId,
    pub rating: i32,
    pub comment: String,
    pub item_id: Option<DbId>,
}
