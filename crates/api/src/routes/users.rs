use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(users::get_own_profile).put(users::update_own_profile),
        )
        .route("/{id}", get(users::get_user))
}
