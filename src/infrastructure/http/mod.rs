//! HTTP Layer - JSON REST API
//!
//! 统一响应格式 `{ success, data?, message? }`，错误映射见 `error`

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::{AppState, Ports, VerificationSettings};
