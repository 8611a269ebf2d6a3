//! Repository for the `reviews` table.

use lendly_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, ReviewWithReviewer};

/// Column list for the `reviews` table.
const COLUMNS: &str = "id, reviewer_id, reviewee_id, rating, comment, item_id, created_at";

/// Provides review operations, including trust-score maintenance.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review and recompute the reviewee's trust score in the same
    /// transaction, so the score never drifts from the review set.
    pub async fn create(
        pool: &PgPool,
        reviewer_id: DbId,
        input: &CreateReview,
    ) -> Result<Review, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO reviews (reviewer_id, reviewee_id, rating, comment, item_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&insert_query)
            .bind(reviewer_id)
            .bind(input.reviewee_id)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(input.item_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE users SET trust_score = \
                 (SELECT AVG(rating)::float8 FROM reviews WHERE reviewee_id = $1) \
             WHERE id = $1",
        )
        .bind(input.reviewee_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(review)
    }

    /// List the reviews a user has received, newest first, with reviewer names.
    pub async fn list_for_user(
        pool: &PgPool,
        reviewee_id: DbId,
    ) -> Result<Vec<ReviewWithReviewer>, sqlx::Error> {
        let sql = "SELECT r.id, r.reviewer_id, r.reviewee_id, r.rating, r.comment, r.item_id, \
                   r.created_at, \
                   u.first_name AS reviewer_first_name, u.last_name AS reviewer_last_name \
                   FROM reviews r \
                   JOIN users u ON u.id = r.reviewer_id \
                   WHERE r.reviewee_id = $1 \
                   ORDER BY r.created_at DESC";
        sqlx::query_as::<_, ReviewWithReviewer>(sql)
            .bind(reviewee_id)
            .fetch_all(pool)
            .await
    }
}
