//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod admin_commands;
mod owner_commands;
mod restaurant_commands;
mod review_commands;
mod user_commands;
mod verification_commands;

pub mod handlers;

pub use admin_commands::*;
pub use owner_commands::*;
pub use restaurant_commands::*;
pub use review_commands::*;
pub use user_commands::*;
pub use verification_commands::*;
