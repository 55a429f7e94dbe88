//! Verification Commands

/// 为单个用户分配认证编号
#[derive(Debug, Clone)]
pub struct VerifyUser {
    pub user_id: String,
}

/// 批量认证：评论数超过阈值的所有用户
#[derive(Debug, Clone)]
pub struct VerifyEligibleUsers;
