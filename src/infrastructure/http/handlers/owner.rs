//! Owner Handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::{CreateOwner, DeleteOwner, ListOwners, OwnerRecord};
use crate::infrastructure::http::dto::{ApiResponse, CreateOwnerRequest, DeleteOwnerRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn list_owners(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<OwnerRecord>>>, ApiError> {
    let owners = state.list_owners_handler.handle(ListOwners).await?;
    Ok(Json(ApiResponse::success(owners)))
}

pub async fn create_owner(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateOwnerRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .create_owner_handler
        .handle(CreateOwner {
            sin: request.sin,
            name: request.name,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_owner(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DeleteOwnerRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .delete_owner_handler
        .handle(DeleteOwner { sin: request.sin })
        .await?;
    Ok(Json(ApiResponse::ok()))
}
