pub mod item;
pub mod message;
pub mod request;
pub mod review;
pub mod user;
