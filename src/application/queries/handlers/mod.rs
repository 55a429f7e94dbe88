//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod admin_handlers;
mod catalog_handlers;
mod restaurant_handlers;
mod review_handlers;
mod user_handlers;

pub use admin_handlers::*;
pub use catalog_handlers::*;
pub use restaurant_handlers::*;
pub use review_handlers::*;
pub use user_handlers::*;
