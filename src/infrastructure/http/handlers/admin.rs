//! Admin Handlers - 连接检查与数据库重置

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{CheckConnection, ResetDatabase};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 纯文本响应：`connected` / `unable to connect`
pub async fn check_db_connection(State(state): State<Arc<AppState>>) -> &'static str {
    if state.check_connection_handler.handle(CheckConnection).await {
        "connected"
    } else {
        "unable to connect"
    }
}

/// 删除全部表并重建、写入演示数据
pub async fn init_db(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.reset_database_handler.handle(ResetDatabase).await?;
    Ok(Json(ApiResponse::ok()))
}
