//! Repository for the `users` table.

use lendly_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateProfile, User, UserProfile};

/// Column list for the `users` table.
const COLUMNS: &str = "id, first_name, last_name, email, password_hash, address, lng, lat, \
    bio, profile_image, trust_score, total_exchanges, items_shared, items_borrowed, \
    created_at, updated_at";

/// Column list without the password hash, for profile queries.
const PROFILE_COLUMNS: &str = "id, first_name, last_name, email, address, lng, lat, bio, \
    profile_image, trust_score, total_exchanges, items_shared, items_borrowed, created_at";

/// Provides CRUD and counter operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users \
                 (first_name, last_name, email, password_hash, address, lng, lat, bio) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.address)
            .bind(input.lng)
            .bind(input.lat)
            .bind(&input.bio)
            .fetch_one(pool)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (lowercased unique key).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE email = lower($1)");
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a user's public profile (no password hash).
    pub async fn find_profile(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserProfile>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's own profile. Only non-`None` fields are applied.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let sql = format!(
            "UPDATE users SET \
                first_name = COALESCE($2, first_name), \
                last_name = COALESCE($3, last_name), \
                address = COALESCE($4, address), \
                lng = COALESCE($5, lng), \
                lat = COALESCE($6, lat), \
                bio = COALESCE($7, bio), \
                profile_image = COALESCE($8, profile_image) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.address)
            .bind(input.lng)
            .bind(input.lat)
            .bind(&input.bio)
            .bind(&input.profile_image)
            .fetch_optional(pool)
            .await
    }

    /// Bump the listings-shared counter after a successful item creation.
    pub async fn increment_items_shared(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET items_shared = items_shared + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a completed exchange: bump the owner's and borrower's counters.
    pub async fn record_exchange(
        pool: &PgPool,
        owner_id: DbId,
        borrower_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("UPDATE users SET total_exchanges = total_exchanges + 1 WHERE id = $1")
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "UPDATE users SET total_exchanges = total_exchanges + 1, \
                 items_borrowed = items_borrowed + 1 \
             WHERE id = $1",
        )
        .bind(borrower_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }
}
