pub mod auth;
pub mod items;
pub mod messages;
pub mod requests;
pub mod reviews;
pub mod users;
