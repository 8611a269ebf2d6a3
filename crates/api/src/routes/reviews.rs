use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(reviews::create_review))
        .route("/{user_id}", get(reviews::list_user_reviews))
}
