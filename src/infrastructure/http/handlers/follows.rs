//! Follows Handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::{
    FollowOutcome, FollowRecord, FollowUser, UnfollowOutcome, UnfollowUser, ViewFollows,
};
use crate::infrastructure::http::dto::{ApiResponse, FollowPairRequest, ViewFollowsRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 1 已关注，0 早已关注；任一用户不存在时返回 422
pub async fn add_to_follows(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FollowPairRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<i32>>, ApiError> {
    let Json(request) = payload?;
    let outcome = state
        .follow_user_handler
        .handle(FollowUser {
            follower: request.user_id1,
            followee: request.user_id2,
        })
        .await?;

    Ok(Json(match outcome {
        FollowOutcome::Followed => ApiResponse::success(outcome.code()),
        FollowOutcome::AlreadyFollowing => ApiResponse::rejected(outcome.code(), outcome.message()),
    }))
}

pub async fn view_follows(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ViewFollowsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<FollowRecord>>>, ApiError> {
    let Json(request) = payload?;
    let follows = state
        .view_follows_handler
        .handle(ViewFollows {
            follower: request.user_id1,
            followee: request.user_id2,
            clause: request.clause,
        })
        .await?;
    Ok(Json(ApiResponse::success(follows)))
}

/// 1 已取消，0 本来就没有关注
pub async fn delete_follows_pair(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FollowPairRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<i32>>, ApiError> {
    let Json(request) = payload?;
    let outcome = state
        .unfollow_user_handler
        .handle(UnfollowUser {
            follower: request.user_id1,
            followee: request.user_id2,
        })
        .await?;

    Ok(Json(match outcome {
        UnfollowOutcome::Unfollowed => ApiResponse::success(outcome.code()),
        UnfollowOutcome::NotFollowing => ApiResponse::rejected(outcome.code(), outcome.message()),
    }))
}
