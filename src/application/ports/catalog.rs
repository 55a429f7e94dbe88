//! Catalog Port - 数据库目录与动态投影

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::Projection;

/// 投影结果行：列名 → 值
pub type ProjectedRow = serde_json::Map<String, serde_json::Value>;

/// Catalog Port
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// 用户表名（不含 SQLite 内部表）
    async fn list_tables(&self) -> Result<Vec<String>, RepositoryError>;

    /// 按定义顺序返回表的列名；表必须是 `list_tables` 返回的规范名
    async fn list_columns(&self, table: &str) -> Result<Vec<String>, RepositoryError>;

    /// 执行已校验的投影
    async fn project(&self, projection: &Projection) -> Result<Vec<ProjectedRow>, RepositoryError>;
}
