//! Repository for the `requests` table.

use lendly_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::Category;
use crate::models::request::{CreateRequest, Request, RequestStatus};

/// Column list for the `requests` table.
const COLUMNS: &str =
    "id, title, description, category, urgency, requester_id, status, created_at, updated_at";

/// Provides CRUD operations for item requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Insert a new request with status `open`.
    pub async fn create(
        pool: &PgPool,
        requester_id: DbId,
        input: &CreateRequest,
    ) -> Result<Request, sqlx::Error> {
        let sql = format!(
            "INSERT INTO requests (title, description, category, urgency, requester_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Request>(&sql)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category)
            .bind(input.urgency)
            .bind(requester_id)
            .fetch_one(pool)
            .await
    }

    /// Find a request by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Request>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM requests WHERE id = $1");
        sqlx::query_as::<_, Request>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests newest first, optionally filtered by status and category.
    pub async fn list(
        pool: &PgPool,
        status: Option<RequestStatus>,
        category: Option<Category>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Request>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM requests \
             WHERE ($1::request_status IS NULL OR status = $1) \
               AND ($2::item_category IS NULL OR category = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Request>(&sql)
            .bind(status)
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count requests matching the same filters as [`Self::list`].
    pub async fn count(
        pool: &PgPool,
        status: Option<RequestStatus>,
        category: Option<Category>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM requests \
             WHERE ($1::request_status IS NULL OR status = $1) \
               AND ($2::item_category IS NULL OR category = $2)",
        )
        .bind(status)
        .bind(category)
        .fetch_one(pool)
        .await
    }

    /// Transition a request's status. Returns `None` if the row is missing.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: RequestStatus,
    ) -> Result<Option<Request>, sqlx::Error> {
        let sql = format!(
            "UPDATE requests SET status = $2 WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Request>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
