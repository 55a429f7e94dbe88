//! Menu Item Handlers - 菜品维护与菜品报表

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::{
    CheapestMenuItemsByType, CreateMenuItem, DeleteMenuItem, ListMenuItemTypes, ListMenuItems,
    MenuItemRecord, MostExpensiveMenuItemsByType, RestaurantSummary, RestaurantsOfferingAllTypes,
    UpdateMenuItemCost,
};
use crate::infrastructure::http::dto::{
    ApiResponse, CreateMenuItemRequest, DeleteMenuItemRequest, EditMenuItemRequest,
    MenuItemTypesParams,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn list_menu_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MenuItemRecord>>>, ApiError> {
    let items = state.list_menu_items_handler.handle(ListMenuItems).await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn create_menu_item(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateMenuItemRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .create_menu_item_handler
        .handle(CreateMenuItem {
            business_number: request.business_number,
            name: request.name,
            item_type: request.item_type,
            cost: request.cost,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_menu_item(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DeleteMenuItemRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .delete_menu_item_handler
        .handle(DeleteMenuItem {
            business_number: request.business_number,
            name: request.name,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn edit_menu_item(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EditMenuItemRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .update_menu_item_cost_handler
        .handle(UpdateMenuItemCost {
            business_number: request.business_number,
            name: request.name,
            cost: request.new_cost,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn list_menu_item_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let types = state
        .list_menu_item_types_handler
        .handle(ListMenuItemTypes)
        .await?;
    Ok(Json(ApiResponse::success(types)))
}

pub async fn cheapest_menu_items_by_type(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MenuItemRecord>>>, ApiError> {
    let items = state
        .cheapest_menu_items_handler
        .handle(CheapestMenuItemsByType)
        .await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn most_expensive_menu_items_by_type(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MenuItemRecord>>>, ApiError> {
    let items = state
        .most_expensive_menu_items_handler
        .handle(MostExpensiveMenuItemsByType)
        .await?;
    Ok(Json(ApiResponse::success(items)))
}

/// `?types=a,b`；不带 types 表示全部类型
pub async fn restaurants_with_all_menu_item_types(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MenuItemTypesParams>,
) -> Result<Json<ApiResponse<Vec<RestaurantSummary>>>, ApiError> {
    let restaurants = state
        .restaurants_offering_all_types_handler
        .handle(RestaurantsOfferingAllTypes {
            types: params.into_types(),
        })
        .await?;
    Ok(Json(ApiResponse::success(restaurants)))
}
