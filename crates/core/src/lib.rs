//! Domain logic for the Lendly resource-sharing platform.
//!
//! This crate has zero internal dependencies so the same helpers can be used
//! by the database layer, the API server, and any future CLI tooling.

pub mod error;
pub mod geo;
pub mod listing;
pub mod message;
pub mod search;
pub mod types;
