//! HTTP Handlers
//!
//! 每个端点解析请求体、调用对应的 Command/Query Handler，并把结果包装成统一响应

mod admin;
mod catalog;
mod follows;
mod menu_item;
mod owner;
mod restaurant;
mod review;
mod user;
mod verification;

pub use admin::*;
pub use catalog::*;
pub use follows::*;
pub use menu_item::*;
pub use owner::*;
pub use restaurant::*;
pub use review::*;
pub use user::*;
pub use verification::*;
