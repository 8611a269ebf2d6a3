use axum::routing::{get, post};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(messages::send_message))
        .route("/{user_id}", get(messages::get_conversation))
}
