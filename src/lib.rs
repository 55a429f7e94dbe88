//! Forkful - 餐厅点评服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 用户、餐厅、菜品、评论、认证编号等值对象与校验规则
//! - Catalog: 动态投影的表名/列名白名单
//!
//! 应用层 (application/):
//! - Ports: 端口定义（各实体 Repository、Catalog、认证编号来源）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: JSON REST API
//! - Persistence: SQLite 存储
//! - Adapters: 随机认证编号来源

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
