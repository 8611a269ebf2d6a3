//! Item request entity model and DTOs.
//!
//! A request is a posted need for an item, matched against listings by the
//! community rather than by the system.

use lendly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::item::Category;

/// How urgently the requester needs the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_urgency")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Request lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Open,
    Fulfilled,
    Closed,
}

/// A row from the `requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Request {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub urgency: Urgency,
    pub requester_id: DbId,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for posting a new request.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub urgency: Urgency,
}
