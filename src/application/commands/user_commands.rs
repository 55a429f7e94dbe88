//! User Commands - 评论用户与关注关系

/// 创建评论用户
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub user_id: String,
    pub name: String,
    pub city_name: String,
    pub province_state: String,
}

/// 部分更新用户，城市与省份必须同时提供
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub user_id: String,
    pub name: Option<String>,
    pub city_name: Option<String>,
    pub province_state: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DeleteUser {
    pub user_id: String,
}

/// follower 关注 followee
#[derive(Debug, Clone)]
pub struct FollowUser {
    pub follower: String,
    pub followee: String,
}

#[derive(Debug, Clone)]
pub struct UnfollowUser {
    pub follower: String,
    pub followee: String,
}
