//! Liveness endpoint. Stateless so load balancers can probe it before the
//! database is reachable.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
