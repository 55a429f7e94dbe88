//! Catalog Handlers - 表、列与投影

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::{ListAttributes, ListTables, ProjectTable, ProjectedRow};
use crate::infrastructure::http::dto::{ApiResponse, ProjectRequest, TableRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn list_tables(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let tables = state.list_tables_handler.handle(ListTables).await?;
    Ok(Json(ApiResponse::success(tables)))
}

pub async fn list_attributes(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TableRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let Json(request) = payload?;
    let columns = state
        .list_attributes_handler
        .handle(ListAttributes {
            table_name: request.table_name,
        })
        .await?;
    Ok(Json(ApiResponse::success(columns)))
}

pub async fn project(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<ProjectedRow>>>, ApiError> {
    let Json(request) = payload?;
    let rows = state
        .project_table_handler
        .handle(ProjectTable {
            table_name: request.table_name,
            attributes: request.query_attributes,
        })
        .await?;
    Ok(Json(ApiResponse::success(rows)))
}
