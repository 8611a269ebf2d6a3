pub mod item_repo;
pub mod message_repo;
pub mod request_repo;
pub mod review_repo;
pub mod user_repo;

pub use item_repo::ItemRepo;
pub use message_repo::MessageRepo;
pub use request_repo::RequestRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
