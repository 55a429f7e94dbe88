//! Verification Handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::{
    ListVerifiedUsers, VerificationSweepReport, VerifiedUserRecord, VerifyEligibleUsers,
    VerifyOutcome, VerifyUser,
};
use crate::infrastructure::http::dto::{ApiResponse, UserIdRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 批量认证评论数达到阈值的用户；任一用户出错时 success 为 false
pub async fn verify_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<VerificationSweepReport>>, ApiError> {
    let report = state
        .verify_eligible_users_handler
        .handle(VerifyEligibleUsers)
        .await?;

    Ok(Json(ApiResponse {
        success: !report.has_errors(),
        message: report
            .has_errors()
            .then(|| format!("{} user(s) could not be verified", report.errors.len())),
        data: Some(report),
    }))
}

/// 认证单个用户：1 已认证，-1 早已认证
pub async fn verify_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserIdRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<i32>>, ApiError> {
    let Json(request) = payload?;
    let outcome = state
        .verify_user_handler
        .handle(VerifyUser {
            user_id: request.user_id,
        })
        .await?;

    Ok(Json(match outcome {
        VerifyOutcome::Verified(_) => ApiResponse::success(outcome.code()),
        VerifyOutcome::AlreadyVerified => {
            ApiResponse::rejected(outcome.code(), "User is already verified!")
        }
    }))
}

pub async fn get_verified_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<VerifiedUserRecord>>>, ApiError> {
    let users = state
        .list_verified_users_handler
        .handle(ListVerifiedUsers)
        .await?;
    Ok(Json(ApiResponse::success(users)))
}
