//! User Queries - 业主、城市、评论用户、关注与认证

#[derive(Debug, Clone)]
pub struct ListOwners;

#[derive(Debug, Clone)]
pub struct ListCities;

/// 用户搜索条件（不区分大小写的子串匹配）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSearch {
    ById(String),
    ByName(String),
}

#[derive(Debug, Clone)]
pub struct SearchUsers {
    pub criterion: UserSearch,
}

#[derive(Debug, Clone)]
pub struct FindUsersByCity {
    pub city_name: String,
    pub province_state: String,
}

/// 查看关注关系：两个 ID 都缺省时返回全部
#[derive(Debug, Clone, Default)]
pub struct ViewFollows {
    pub follower: Option<String>,
    pub followee: Option<String>,
    pub clause: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListVerifiedUsers;
