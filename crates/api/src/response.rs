//! Shared response types for API handlers.
//!
//! List endpoints return `{ "<resource>": [...], "pagination": { ... } }`;
//! the [`Pagination`] block is shared across all of them.

use lendly_core::search::total_pages;
use serde::Serialize;

/// Pagination metadata for offset-paginated list responses.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    /// Build the pagination block from the clamped page/limit and the total
    /// row count of the parallel count query.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            pages: total_pages(total, limit),
        }
    }
}
