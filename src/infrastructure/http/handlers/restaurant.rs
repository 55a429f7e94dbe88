//! Restaurant Handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::{
    CreateRestaurant, DeleteRestaurant, ListRestaurants, RestaurantListing, UpdateRestaurant,
};
use crate::infrastructure::http::dto::{
    ApiResponse, BusinessNumberRequest, CreateRestaurantRequest, UpdateRestaurantRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn list_restaurants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RestaurantListing>>>, ApiError> {
    let restaurants = state.list_restaurants_handler.handle(ListRestaurants).await?;
    Ok(Json(ApiResponse::success(restaurants)))
}

/// 邮编、城市、地址、业主任一检查失败时返回 422 和原因
pub async fn create_restaurant(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateRestaurantRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .create_restaurant_handler
        .handle(CreateRestaurant {
            business_number: request.business_number,
            name: request.name,
            house_number: request.house_number,
            street_name: request.street_name,
            postal_code: request.postal_code,
            city_name: request.city_name,
            owner_id: request.owner_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn update_restaurant(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateRestaurantRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .update_restaurant_handler
        .handle(UpdateRestaurant {
            business_number: request.business_number,
            name: request.name,
            house_number: request.house_number,
            street_name: request.street_name,
            postal_code: request.postal_code,
            city_name: request.city_name,
            owner_id: request.owner_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_restaurant(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BusinessNumberRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .delete_restaurant_handler
        .handle(DeleteRestaurant {
            business_number: request.business_number,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}
