//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 用户认证配置
    #[serde(default)]
    pub verification: VerificationConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 前端页面托管
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    #[serde(default)]
    pub enabled: bool,

    /// 静态文件目录，未匹配任何 API 的路径回落到这里
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    50000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 启用时返回静态文件目录
    pub fn static_dir(&self) -> Option<PathBuf> {
        self.static_files
            .enabled
            .then(|| self.static_files.dir.clone())
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// City 表为空时写入演示数据
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_db_path() -> String {
    "data/forkful.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

/// 用户认证配置
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    /// 评论数超过该值的用户参与批量认证
    #[serde(default = "default_review_threshold")]
    pub review_threshold: u32,

    /// 单个用户抽取认证编号的最大次数
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_review_threshold() -> u32 {
    3
}

fn default_max_attempts() -> u32 {
    32
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            review_threshold: default_review_threshold(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    /// RUST_LOG 未设置时使用的过滤规则
    pub fn filter(&self) -> String {
        format!("{},forkful={},tower_http=debug", self.level, self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 50000);
        assert_eq!(config.database.path, "data/forkful.db");
        assert!(config.database.seed_demo_data);
        assert_eq!(config.verification.review_threshold, 3);
        assert_eq!(config.verification.max_attempts, 32);
    }

    #[test]
    fn test_static_dir_only_when_enabled() {
        let mut config = ServerConfig::default();
        assert_eq!(config.static_dir(), None);

        config.static_files.enabled = true;
        assert_eq!(config.static_dir(), Some(PathBuf::from("public")));
    }

    #[test]
    fn test_log_filter() {
        let config = LogConfig {
            level: "debug".to_string(),
        };
        assert_eq!(config.filter(), "debug,forkful=debug,tower_http=debug");
    }
}
