//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{RepositoryError, RestaurantRejection, RestaurantWriteError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{0}")]
    NotFound(String),

    /// 验证错误
    #[error("{0}")]
    ValidationError(String),

    /// 主键冲突
    #[error("{0}")]
    Conflict(String),

    /// 业务规则违反
    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    /// 前置条件不满足，`code` 为返回给客户端的结果码
    #[error("{message}")]
    Precondition { code: Option<i32>, message: String },

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// 创建带结果码的前置条件错误
    pub fn precondition(code: i32, message: impl Into<String>) -> Self {
        Self::Precondition {
            code: Some(code),
            message: message.into(),
        }
    }

    /// 创建业务规则违反错误
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::Duplicate(msg) => Self::Conflict(msg),
            RepositoryError::ForeignKey(msg) => Self::Precondition {
                code: None,
                message: msg,
            },
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

impl From<RestaurantWriteError> for ApplicationError {
    fn from(err: RestaurantWriteError) -> Self {
        match err {
            RestaurantWriteError::Rejected(RestaurantRejection::RestaurantMissing) => {
                Self::NotFound(RestaurantRejection::RestaurantMissing.message().to_string())
            }
            RestaurantWriteError::Rejected(rejection) => {
                Self::precondition(rejection.code(), rejection.message())
            }
            RestaurantWriteError::Repository(err) => err.into(),
        }
    }
}
