//! User Handlers - 用户增删改查与城市列表

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::{
    CityRecord, CreateUser, CreateUserOutcome, DeleteUser, FindUsersByCity, ListCities,
    SearchUsers, UpdateUser, UserRecord, UserSearch, UserSummary,
};
use crate::infrastructure::http::dto::{
    ApiResponse, CreateUserRequest, SearchUserByCityRequest, SearchUserByIdRequest,
    SearchUserByNameRequest, UpdateUserRequest, UserIdRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建用户：1 已创建，-1 用户已存在
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<i32>>, ApiError> {
    let Json(request) = payload?;
    let outcome = state
        .create_user_handler
        .handle(CreateUser {
            user_id: request.userid,
            name: request.name,
            city_name: request.city,
            province_state: request.province,
        })
        .await?;

    Ok(Json(match outcome {
        CreateUserOutcome::Created => ApiResponse::success(outcome.code()),
        CreateUserOutcome::AlreadyExists => ApiResponse::rejected(outcome.code(), outcome.message()),
    }))
}

pub async fn search_user_by_id(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchUserByIdRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<UserRecord>>>, ApiError> {
    let Json(request) = payload?;
    let users = state
        .search_users_handler
        .handle(SearchUsers {
            criterion: UserSearch::ById(request.user_id),
        })
        .await?;
    Ok(Json(ApiResponse::success(users)))
}

pub async fn search_user_by_name(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchUserByNameRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<UserRecord>>>, ApiError> {
    let Json(request) = payload?;
    let users = state
        .search_users_handler
        .handle(SearchUsers {
            criterion: UserSearch::ByName(request.user_name),
        })
        .await?;
    Ok(Json(ApiResponse::success(users)))
}

pub async fn search_user_by_city(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchUserByCityRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<UserSummary>>>, ApiError> {
    let Json(request) = payload?;
    let users = state
        .find_users_by_city_handler
        .handle(FindUsersByCity {
            city_name: request.city,
            province_state: request.province,
        })
        .await?;
    Ok(Json(ApiResponse::success(users)))
}

/// 部分更新；城市与省份必须同时修改
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .update_user_handler
        .handle(UpdateUser {
            user_id: request.user_id,
            name: request.new_name,
            city_name: request.new_city,
            province_state: request.new_province,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

/// 返回删除行数；0 表示用户不存在
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserIdRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<u64>>, ApiError> {
    let Json(request) = payload?;
    let deleted = state
        .delete_user_handler
        .handle(DeleteUser {
            user_id: request.user_id,
        })
        .await?;

    Ok(Json(if deleted > 0 {
        ApiResponse::success(deleted)
    } else {
        ApiResponse::rejected(deleted, "Could not find user with given ID!")
    }))
}

pub async fn list_cities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CityRecord>>>, ApiError> {
    let cities = state.list_cities_handler.handle(ListCities).await?;
    Ok(Json(ApiResponse::success(cities)))
}
