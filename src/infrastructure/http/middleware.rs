//! HTTP Middleware
//!
//! 按状态码记录失败请求

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// 4xx 记 warn，5xx 记 error，附带方法、路径和耗时
///
/// 失败原因本身由 `ApiError::into_response()` 记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "Request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "Request rejected"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request as HttpRequest, StatusCode},
        routing::{delete, get},
        Json, Router,
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    async fn connected() -> &'static str {
        "connected"
    }

    async fn precondition_failed() -> (StatusCode, Json<Value>) {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "success": false, "data": -1 })),
        )
    }

    async fn database_down() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn router() -> Router {
        Router::new()
            .route("/check-db-connection", get(connected))
            .route("/delete_follows_pair", delete(precondition_failed))
            .route("/init-db", get(database_down))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn call(method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = HttpRequest::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let (status, body) = call("GET", "/check-db-connection").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"connected");
    }

    #[tokio::test]
    async fn test_client_error_body_untouched() {
        let (status, body) = call("DELETE", "/delete_follows_pair").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["data"], json!(-1));
    }

    #[tokio::test]
    async fn test_server_error_status_kept() {
        let (status, _) = call("GET", "/init-db").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _) = call("GET", "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
