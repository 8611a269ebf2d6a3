use axum::routing::{get, post};
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route("/user/{user_id}", get(items::list_user_items))
        .route(
            "/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/{id}/borrow", post(items::borrow_item))
        .route("/{id}/return", post(items::return_item))
        .route("/{id}/favorite", post(items::favorite_item))
}
