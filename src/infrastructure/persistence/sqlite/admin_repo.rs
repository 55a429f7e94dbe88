//! SQLite Database Admin

use async_trait::async_trait;

use super::errors::db_error;
use super::{reset_database, DbPool};
use crate::application::ports::{DatabaseAdminPort, RepositoryError};

/// SQLite 数据库管理
pub struct SqliteDatabaseAdmin {
    pool: DbPool,
}

impl SqliteDatabaseAdmin {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseAdminPort for SqliteDatabaseAdmin {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn reset_and_seed(&self) -> Result<(), RepositoryError> {
        reset_database(&self.pool).await.map_err(db_error)
    }
}
