//! Repository for the `messages` table.

use lendly_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{CreateMessage, Message};

/// Column list for the `messages` table.
const COLUMNS: &str = "id, sender_id, recipient_id, content, item_id, read, created_at";

/// Provides messaging operations.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a new message.
    pub async fn create(
        pool: &PgPool,
        sender_id: DbId,
        input: &CreateMessage,
    ) -> Result<Message, sqlx::Error> {
        let sql = format!(
            "INSERT INTO messages (sender_id, recipient_id, content, item_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&sql)
            .bind(sender_id)
            .bind(input.recipient_id)
            .bind(&input.content)
            .bind(input.item_id)
            .fetch_one(pool)
            .await
    }

    /// Fetch the conversation between two users, oldest first.
    pub async fn conversation(
        pool: &PgPool,
        user_a: DbId,
        user_b: DbId,
        limit: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM messages \
             WHERE (sender_id = $1 AND recipient_id = $2) \
                OR (sender_id = $2 AND recipient_id = $1) \
             ORDER BY created_at ASC \
             LIMIT $3"
        );
        sqlx::query_as::<_, Message>(&sql)
            .bind(user_a)
            .bind(user_b)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Mark all messages from `sender_id` to `recipient_id` as read.
    ///
    /// Returns the number of messages marked.
    pub async fn mark_read(
        pool: &PgPool,
        recipient_id: DbId,
        sender_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET read = true \
             WHERE recipient_id = $1 AND sender_id = $2 AND read = false",
        )
        .bind(recipient_id)
        .bind(sender_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
