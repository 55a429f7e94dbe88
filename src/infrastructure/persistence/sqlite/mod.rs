//! SQLite Persistence - SQLite 数据库持久化实现

mod admin_repo;
mod catalog_repo;
mod database;
mod errors;
mod follows_repo;
mod menu_item_repo;
mod owner_repo;
mod restaurant_repo;
mod review_repo;
mod schema;
mod user_repo;
mod verification_repo;

pub use admin_repo::*;
pub use catalog_repo::*;
pub use database::*;
pub use follows_repo::*;
pub use menu_item_repo::*;
pub use owner_repo::*;
pub use restaurant_repo::*;
pub use review_repo::*;
pub use user_repo::*;
pub use verification_repo::*;
