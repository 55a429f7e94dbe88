//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod admin_handlers;
mod owner_handlers;
mod restaurant_handlers;
mod review_handlers;
mod user_handlers;
mod verification_handlers;

pub use admin_handlers::*;
pub use owner_handlers::*;
pub use restaurant_handlers::*;
pub use review_handlers::*;
pub use user_handlers::*;
pub use verification_handlers::*;
