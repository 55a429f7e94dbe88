//! Review Handlers - 菜品评论与餐厅评论

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::{
    CreateMenuItemReview, CreateRestaurantReview, DeleteMenuItemReview, DeleteRestaurantReview,
    ListMenuItemReviews, MenuItemReviewRecord, RestaurantReviewView, UpdateRestaurantReview,
    ViewRestaurantReviews,
};
use crate::infrastructure::http::dto::{
    ApiResponse, CreateMenuItemReviewRequest, CreateRestaurantReviewRequest, ReviewFilterParams,
    ReviewNumberRequest, UpdateRestaurantReviewRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Menu Item Reviews
// ============================================================================

pub async fn list_menu_item_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MenuItemReviewRecord>>>, ApiError> {
    let reviews = state
        .list_menu_item_reviews_handler
        .handle(ListMenuItemReviews)
        .await?;
    Ok(Json(ApiResponse::success(reviews)))
}

pub async fn create_menu_item_review(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateMenuItemReviewRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .create_menu_item_review_handler
        .handle(CreateMenuItemReview {
            review_number: request.review_number,
            business_number: request.business_number,
            menu_item_name: request.menu_item_name,
            presentation_rating: request.presentation_rating,
            taste_rating: request.taste_rating,
            portion_size_rating: request.portion_size_rating,
            content: request.content,
            user_id: request.user_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_menu_item_review(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReviewNumberRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .delete_menu_item_review_handler
        .handle(DeleteMenuItemReview {
            review_number: request.review_number,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

// ============================================================================
// Restaurant Reviews
// ============================================================================

/// `?type=user|restaurant&value=..`，不带参数时返回全部评论
pub async fn view_restaurant_reviews(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReviewFilterParams>,
) -> Result<Json<ApiResponse<RestaurantReviewView>>, ApiError> {
    let view = state
        .view_restaurant_reviews_handler
        .handle(ViewRestaurantReviews {
            filter_type: params.filter_type,
            value: params.value,
        })
        .await?;
    Ok(Json(ApiResponse::success(view)))
}

pub async fn create_restaurant_review(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateRestaurantReviewRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .create_restaurant_review_handler
        .handle(CreateRestaurantReview {
            review_number: request.review_number,
            business_number: request.business_number,
            user_id: request.user_id,
            ambience_rating: request.ambience_rating,
            cleanliness_rating: request.cleanliness_rating,
            service_rating: request.service_rating,
            content: request.content,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn update_restaurant_review(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateRestaurantReviewRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .update_restaurant_review_handler
        .handle(UpdateRestaurantReview {
            review_number: request.review_number,
            ambience_rating: request.ambience_rating,
            cleanliness_rating: request.cleanliness_rating,
            service_rating: request.service_rating,
            content: request.content,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_restaurant_review(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReviewNumberRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    state
        .delete_restaurant_review_handler
        .handle(DeleteRestaurantReview {
            review_number: request.review_number,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}
