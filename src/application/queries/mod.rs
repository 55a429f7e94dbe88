//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod admin_queries;
mod catalog_queries;
mod restaurant_queries;
mod review_queries;
mod user_queries;

pub mod handlers;

pub use admin_queries::*;
pub use catalog_queries::*;
pub use restaurant_queries::*;
pub use review_queries::*;
pub use user_queries::*;
