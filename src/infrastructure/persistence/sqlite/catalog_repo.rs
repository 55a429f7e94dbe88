//! SQLite Catalog - 读取 sqlite_master 并执行动态投影

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use super::errors::db_error;
use super::DbPool;
use crate::application::ports::{CatalogPort, ProjectedRow, RepositoryError};
use crate::domain::Projection;

/// SQLite Catalog
pub struct SqliteCatalog {
    pool: DbPool,
}

impl SqliteCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// 按存储类型把一行转成 JSON 对象
fn row_to_json(row: &SqliteRow) -> Result<ProjectedRow, sqlx::Error> {
    let mut object = ProjectedRow::new();

    for (index, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let type_name = raw.type_info().name().to_string();
            match type_name.as_str() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(index)?),
                "REAL" => Value::from(row.try_get::<f64, _>(index)?),
                "BLOB" => {
                    let bytes: Vec<u8> = row.try_get(index)?;
                    Value::from(String::from_utf8_lossy(&bytes).into_owned())
                }
                _ => Value::from(row.try_get::<String, _>(index)?),
            }
        };
        object.insert(column.name().to_string(), value);
    }

    Ok(object)
}

#[async_trait]
impl CatalogPort for SqliteCatalog {
    async fn list_tables(&self) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM pragma_table_info(?) ORDER BY cid")
                .bind(table)
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn project(&self, projection: &Projection) -> Result<Vec<ProjectedRow>, RepositoryError> {
        let rows = sqlx::query(&projection.to_sql())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.iter()
            .map(row_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))
    }
}
