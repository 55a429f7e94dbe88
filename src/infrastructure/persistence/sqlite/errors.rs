//! sqlx 错误到仓储错误的转换

use crate::application::ports::RepositoryError;

/// 按约束类型区分数据库错误，`entity` 用于错误信息
pub(crate) fn classify(err: sqlx::Error, entity: &str) -> RepositoryError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return RepositoryError::Duplicate(format!("{} already exists", entity));
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::ForeignKey(format!(
                "{} refers to a row that does not exist",
                entity
            ));
        }
    }
    RepositoryError::DatabaseError(err.to_string())
}

pub(crate) fn db_error(err: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(err.to_string())
}
