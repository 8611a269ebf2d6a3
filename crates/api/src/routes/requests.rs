use axum::routing::{get, put};
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/{id}", get(requests::get_request))
        .route("/{id}/status", put(requests::update_request_status))
}
