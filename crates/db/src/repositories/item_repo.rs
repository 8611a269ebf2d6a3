//! Repository for the `items` table: discovery search plus CRUD and
//! status transitions.
//!
//! Discovery combines three native PostgreSQL mechanisms, mirroring the
//! product contract:
//!
//! - proximity: an extension-free haversine expression over `lng`/`lat`,
//!   filtered to the caller's radius and sorted ascending;
//! - relevance: a GIN-indexed `search_vector` matched with `to_tsquery` and
//!   ranked with `ts_rank` (only when no origin is supplied);
//! - recency: `created_at DESC` as the fallback ordering.

use lendly_core::listing::derive_tags;
use lendly_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::item::{
    CreateItem, Item, ItemFilter, ItemStatus, ItemWithOwnerRow, UpdateItem,
};

/// Column list for the `items` table (unprefixed).
const COLUMNS: &str = "id, title, description, category, condition, item_type, owner_id, \
    images, start_date, end_date, flexible, lng, lat, status, borrowed_by, borrowed_at, \
    return_by, views, favorites, tags, is_active, created_at, updated_at";

/// Column list for the `items` table, prefixed for JOIN queries.
const ITEM_COLUMNS: &str = "i.id, i.title, i.description, i.category, i.condition, \
    i.item_type, i.owner_id, i.images, i.start_date, i.end_date, i.flexible, i.lng, i.lat, \
    i.status, i.borrowed_by, i.borrowed_at, i.return_by, i.views, i.favorites, i.tags, \
    i.is_active, i.created_at, i.updated_at";

/// Owner summary columns joined from `users`.
const OWNER_COLUMNS: &str = "u.first_name AS owner_first_name, \
    u.last_name AS owner_last_name, u.trust_score AS owner_trust_score, \
    u.total_exchanges AS owner_total_exchanges, u.profile_image AS owner_profile_image";

/// Shared discovery filter. Every bind is always present; absent filters are
/// passed as NULL so one prepared statement covers all combinations.
///
/// Binds: $1 category, $2 type, $3 condition, $4 tsquery, $5 excluded owner.
const DISCOVERY_FILTER: &str = "i.status = 'available' AND i.is_active = true \
    AND ($1::item_category IS NULL OR i.category = $1) \
    AND ($2::item_type IS NULL OR i.item_type = $2) \
    AND ($3::item_condition IS NULL OR i.condition = $3) \
    AND ($4::text IS NULL OR i.search_vector @@ to_tsquery('english', $4)) \
    AND ($5::bigint IS NULL OR i.owner_id <> $5)";

/// Haversine great-circle distance in meters from the origin ($6 lng, $7 lat)
/// to the item's stored point. Matches `lendly_core::geo::haversine_distance_m`.
const HAVERSINE_M: &str = "2 * 6371000 * asin(sqrt( \
    power(sin(radians(i.lat - $7) / 2), 2) + \
    cos(radians($7)) * cos(radians(i.lat)) * power(sin(radians(i.lng - $6) / 2), 2)))";

/// Build the discovery SELECT for the given query mode.
///
/// Sort contract: distance ascending whenever an origin is present (even if a
/// text query is also present), otherwise text rank then recency, otherwise
/// recency alone.
fn search_sql(has_origin: bool, has_text: bool) -> String {
    if has_origin {
        // $8 radius_m, $9 limit, $10 offset.
        format!(
            "SELECT * FROM ( \
                 SELECT {ITEM_COLUMNS}, {OWNER_COLUMNS}, {HAVERSINE_M} AS distance_m \
                 FROM items i \
                 JOIN users u ON u.id = i.owner_id \
                 WHERE {DISCOVERY_FILTER} \
             ) nearby \
             WHERE nearby.distance_m <= $8 \
             ORDER BY nearby.distance_m ASC \
             LIMIT $9 OFFSET $10"
        )
    } else {
        let order = if has_text {
            "ts_rank(i.search_vector, to_tsquery('english', $4)) DESC, i.created_at DESC"
        } else {
            "i.created_at DESC"
        };
        // $6 limit, $7 offset.
        format!(
            "SELECT {ITEM_COLUMNS}, {OWNER_COLUMNS}, NULL::float8 AS distance_m \
             FROM items i \
             JOIN users u ON u.id = i.owner_id \
             WHERE {DISCOVERY_FILTER} \
             ORDER BY {order} \
             LIMIT $6 OFFSET $7"
        )
    }
}

/// Build the parallel COUNT query with identical filter semantics.
fn count_sql(has_origin: bool) -> String {
    if has_origin {
        format!(
            "SELECT COUNT(*) FROM ( \
                 SELECT {HAVERSINE_M} AS distance_m \
                 FROM items i \
                 WHERE {DISCOVERY_FILTER} \
             ) nearby \
             WHERE nearby.distance_m <= $8"
        )
    } else {
        format!("SELECT COUNT(*) FROM items i WHERE {DISCOVERY_FILTER}")
    }
}

/// Provides discovery search and CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    // -----------------------------------------------------------------------
    // Discovery
    // -----------------------------------------------------------------------

    /// Execute the discovery query: one page of available, active items
    /// matching the filter, each joined with its owner summary.
    pub async fn search(
        pool: &PgPool,
        filter: &ItemFilter,
    ) -> Result<Vec<ItemWithOwnerRow>, sqlx::Error> {
        let sql = search_sql(filter.origin.is_some(), filter.tsquery.is_some());

        let mut query = sqlx::query_as::<_, ItemWithOwnerRow>(&sql)
            .bind(filter.category)
            .bind(filter.item_type)
            .bind(filter.condition)
            .bind(&filter.tsquery)
            .bind(filter.exclude_owner);

        query = match filter.origin {
            Some(origin) => query
                .bind(origin.lng)
                .bind(origin.lat)
                .bind(origin.radius_m)
                .bind(filter.limit)
                .bind(filter.offset),
            None => query.bind(filter.limit).bind(filter.offset),
        };

        query.fetch_all(pool).await
    }

    /// Total number of items matching the filter, ignoring pagination.
    pub async fn count(pool: &PgPool, filter: &ItemFilter) -> Result<i64, sqlx::Error> {
        let sql = count_sql(filter.origin.is_some());

        let mut query = sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.category)
            .bind(filter.item_type)
            .bind(filter.condition)
            .bind(&filter.tsquery)
            .bind(filter.exclude_owner);

        if let Some(origin) = filter.origin {
            query = query
                .bind(origin.lng)
                .bind(origin.lat)
                .bind(origin.radius_m);
        }

        query.fetch_one(pool).await
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert a new item at the owner's location. Tags are derived from the
    /// title and description.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        lng: f64,
        lat: f64,
        input: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let tags = derive_tags(&input.title, &input.description);

        let sql = format!(
            "INSERT INTO items \
                 (title, description, category, condition, item_type, owner_id, images, \
                  start_date, end_date, flexible, lng, lat, tags) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );

        sqlx::query_as::<_, Item>(&sql)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category)
            .bind(input.condition)
            .bind(input.item_type)
            .bind(owner_id)
            .bind(&input.images)
            .bind(input.availability.start_date)
            .bind(input.availability.end_date)
            .bind(input.availability.flexible)
            .bind(lng)
            .bind(lat)
            .bind(&tags)
            .fetch_one(pool)
            .await
    }

    /// Find an item by ID regardless of soft-delete state.
    ///
    /// Callers decide whether an inactive row is a 404.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active item by ID, joined with its owner summary.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ItemWithOwnerRow>, sqlx::Error> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS}, {OWNER_COLUMNS}, NULL::float8 AS distance_m \
             FROM items i \
             JOIN users u ON u.id = i.owner_id \
             WHERE i.id = $1 AND i.is_active = true"
        );
        sqlx::query_as::<_, ItemWithOwnerRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update an item. Only non-`None` fields are applied; tags are
    /// re-derived when the title or description changes.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE items SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                category = COALESCE($4, category), \
                condition = COALESCE($5, condition), \
                images = COALESCE($6, images), \
                status = COALESCE($7, status) \
             WHERE id = $1 AND is_active = true \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Item>(&update_query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category)
            .bind(input.condition)
            .bind(&input.images)
            .bind(input.status)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut item) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(availability) = &input.availability {
            let availability_query = format!(
                "UPDATE items SET start_date = $2, end_date = $3, flexible = $4 \
                 WHERE id = $1 \
                 RETURNING {COLUMNS}"
            );
            item = sqlx::query_as::<_, Item>(&availability_query)
                .bind(id)
                .bind(availability.start_date)
                .bind(availability.end_date)
                .bind(availability.flexible)
                .fetch_one(&mut *tx)
                .await?;
        }

        if input.title.is_some() || input.description.is_some() {
            let tags = derive_tags(&item.title, &item.description);
            let tags_query =
                format!("UPDATE items SET tags = $2 WHERE id = $1 RETURNING {COLUMNS}");
            item = sqlx::query_as::<_, Item>(&tags_query)
                .bind(id)
                .bind(&tags)
                .fetch_one(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(item))
    }

    /// Soft-delete an item (set `is_active = false`). Never removes the row.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE items SET is_active = false \
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the view counter.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE items SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Increment the favorite counter, returning the new count.
    pub async fn increment_favorites(pool: &PgPool, id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE items SET favorites = favorites + 1 \
             WHERE id = $1 AND is_active = true \
             RETURNING favorites",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Owner listings
    // -----------------------------------------------------------------------

    /// List a user's active items, newest first, optionally filtered by status.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        status: Option<ItemStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ItemWithOwnerRow>, sqlx::Error> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS}, {OWNER_COLUMNS}, NULL::float8 AS distance_m \
             FROM items i \
             JOIN users u ON u.id = i.owner_id \
             WHERE i.owner_id = $1 AND i.is_active = true \
               AND ($2::item_status IS NULL OR i.status = $2) \
             ORDER BY i.created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ItemWithOwnerRow>(&sql)
            .bind(owner_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a user's active items, optionally filtered by status.
    pub async fn count_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        status: Option<ItemStatus>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM items \
             WHERE owner_id = $1 AND is_active = true \
               AND ($2::item_status IS NULL OR status = $2)",
        )
        .bind(owner_id)
        .bind(status)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Status transitions
    // -----------------------------------------------------------------------

    /// Mark an available item as borrowed. The `WHERE status = 'available'`
    /// guard makes concurrent borrow attempts race-safe: exactly one wins.
    pub async fn borrow(
        pool: &PgPool,
        id: DbId,
        borrower_id: DbId,
        return_by: Option<Timestamp>,
    ) -> Result<Option<Item>, sqlx::Error> {
        let sql = format!(
            "UPDATE items SET \
                status = 'borrowed', \
                borrowed_by = $2, \
                borrowed_at = NOW(), \
                return_by = $3 \
             WHERE id = $1 AND is_active = true AND status = 'available' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .bind(borrower_id)
            .bind(return_by)
            .fetch_optional(pool)
            .await
    }

    /// Mark a borrowed item as returned and available again.
    pub async fn mark_returned(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let sql = format!(
            "UPDATE items SET \
                status = 'available', \
                borrowed_by = NULL, \
                borrowed_at = NULL, \
                return_by = NULL \
             WHERE id = $1 AND is_active = true AND status = 'borrowed' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The SQL builders are pure, so the sort/filter contract is checked here
    // without a database.

    #[test]
    fn geo_query_sorts_by_distance() {
        let sql = search_sql(true, false);
        assert!(sql.contains("ORDER BY nearby.distance_m ASC"));
        assert!(sql.contains("nearby.distance_m <= $8"));
    }

    #[test]
    fn geo_with_text_still_sorts_by_distance_not_rank() {
        let sql = search_sql(true, true);
        assert!(sql.contains("ORDER BY nearby.distance_m ASC"));
        assert!(
            !sql.contains("ts_rank"),
            "text rank must not influence ordering when an origin is present"
        );
        // The text filter itself still applies.
        assert!(sql.contains("search_vector @@ to_tsquery"));
    }

    #[test]
    fn text_query_sorts_by_rank_then_recency() {
        let sql = search_sql(false, true);
        assert!(sql.contains(
            "ORDER BY ts_rank(i.search_vector, to_tsquery('english', $4)) DESC, i.created_at DESC"
        ));
    }

    #[test]
    fn default_query_sorts_by_recency() {
        let sql = search_sql(false, false);
        assert!(sql.contains("ORDER BY i.created_at DESC"));
        assert!(!sql.contains("ts_rank"));
    }

    #[test]
    fn every_branch_excludes_unavailable_and_deleted() {
        for sql in [
            search_sql(true, true),
            search_sql(true, false),
            search_sql(false, true),
            search_sql(false, false),
            count_sql(true),
            count_sql(false),
        ] {
            assert!(sql.contains("i.status = 'available'"));
            assert!(sql.contains("i.is_active = true"));
            assert!(sql.contains("$5::bigint IS NULL OR i.owner_id <> $5"));
        }
    }

    #[test]
    fn count_matches_search_filter_semantics() {
        // The geo count applies the same radius cut as the geo search.
        assert!(count_sql(true).contains("nearby.distance_m <= $8"));
    }
}
