//! HTTP Error Handling
//!
//! 应用层错误到 HTTP 状态码与统一响应体的映射

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ApiResponse;
use crate::application::ApplicationError;

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    /// 前置条件不满足，`code` 原样放入 data
    Unprocessable { message: String, code: Option<i32> },
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Resource not found");
                (None, msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Bad request");
                (None, msg)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Resource conflict");
                (None, msg)
            }
            ApiError::Unprocessable { message, code } => {
                tracing::warn!(status = status.as_u16(), code = ?code, error = %message, "Precondition failed");
                (code, message)
            }
            ApiError::Internal(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Internal server error");
                (None, msg)
            }
        };

        let body = ApiResponse::<i32> {
            success: false,
            data: code,
            message: Some(message),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound(msg) => ApiError::NotFound(msg),
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::Conflict(msg) => ApiError::Conflict(msg),
            ApplicationError::BusinessRuleViolation(msg) => ApiError::Unprocessable {
                message: msg,
                code: None,
            },
            ApplicationError::Precondition { code, message } => {
                ApiError::Unprocessable { message, code }
            }
            ApplicationError::InvalidState(msg) => ApiError::BadRequest(msg),
            ApplicationError::RepositoryError(msg) => ApiError::Internal(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

/// 请求体无法解析（字段缺失、类型错误）
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_of(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_precondition_carries_code() {
        let error: ApiError = ApplicationError::precondition(-2, "The second user does not exist!").into();
        let (status, body) = body_of(error).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({ "success": false, "data": -2, "message": "The second user does not exist!" })
        );
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (ApplicationError::not_found("x"), StatusCode::NOT_FOUND),
            (ApplicationError::validation("x"), StatusCode::BAD_REQUEST),
            (ApplicationError::conflict("x"), StatusCode::CONFLICT),
            (ApplicationError::business_rule("x"), StatusCode::UNPROCESSABLE_ENTITY),
            (ApplicationError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            let (status, body) = body_of(error.into()).await;
            assert_eq!(status, expected);
            assert_eq!(body["success"], json!(false));
            assert!(body.get("data").is_none());
        }
    }
}
