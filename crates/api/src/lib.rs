//! Lendly API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! auth) so integration tests and the binary entrypoint can both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Build the full application router: the health probe at the root and all
/// resource routes under `/api`. Middleware layers are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api", routes::api_routes())
        .with_state(state)
}
