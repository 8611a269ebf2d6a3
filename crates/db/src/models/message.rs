//! Direct message entity model and DTOs.

use lendly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub content: String,
    pub item_id: Option<DbId>,
    pub read: bool,
    pub created_at: Timestamp,
}

/// DTO for sending a message. The sender comes from the auth token.
#[derive(Debug, Deserialize)]
pub struct CreateMessage {
    pub recipient_id: DbId,
    pub content: String,
    pub item_id: Option<DbId>,
}
