//! Route tree assembly.
//!
//! ```text
//! /health
//! /api
//!   /auth      POST /register, POST /login, GET /me
//!   /items     GET /, POST /, GET /user/{user_id},
//!              GET|PUT|DELETE /{id},
//!              POST /{id}/borrow, /{id}/return, /{id}/favorite
//!   /requests  GET /, POST /, GET /{id}, PUT /{id}/status
//!   /messages  POST /, GET /{user_id}
//!   /users     GET|PUT /profile, GET /{id}
//!   /reviews   POST /, GET /{user_id}
//! ```

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod health;
pub mod items;
pub mod messages;
pub mod requests;
pub mod reviews;
pub mod users;

/// All `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::routes())
        .nest("/items", items::routes())
        .nest("/requests", requests::routes())
        .nest("/messages", messages::routes())
        .nest("/users", users::routes())
        .nest("/reviews", reviews::routes())
}
