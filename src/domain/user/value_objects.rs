//! User Context - Value Objects

use serde::{Deserialize, Serialize};

/// 用户标识（VARCHAR(30)）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub const MAX_LEN: usize = 30;

    pub fn new(id: impl Into<String>) -> Result<Self, &'static str> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err("User ID cannot be empty");
        }
        if id.chars().count() > Self::MAX_LEN {
            return Err("User ID cannot be longer than 30 characters");
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 城市引用：City 表的复合主键 (Name, Province_State)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityRef {
    name: String,
    province_state: String,
}

impl CityRef {
    pub const MAX_LEN: usize = 30;

    pub fn new(
        name: impl Into<String>,
        province_state: impl Into<String>,
    ) -> Result<Self, &'static str> {
        let name = name.into().trim().to_string();
        let province_state = province_state.into().trim().to_string();
        if name.is_empty() || province_state.is_empty() {
            return Err("City and province/state are both required");
        }
        if name.chars().count() > Self::MAX_LEN || province_state.chars().count() > Self::MAX_LEN {
            return Err("City and province/state cannot be longer than 30 characters");
        }
        Ok(Self {
            name,
            province_state,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn province_state(&self) -> &str {
        &self.province_state
    }
}

impl std::fmt::Display for CityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.province_state)
    }
}

/// 同时给出两个用户时的组合条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FollowClause {
    And,
    #[default]
    Or,
}

impl FollowClause {
    /// 只有 `AND`（不区分大小写）表示且，其余一律视为或
    pub fn parse(clause: Option<&str>) -> Self {
        match clause {
            Some(c) if c.trim().eq_ignore_ascii_case("and") => FollowClause::And,
            _ => FollowClause::Or,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            FollowClause::And => "AND",
            FollowClause::Or => "OR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_validation() {
        assert_eq!(UserId::new(" user1 ").unwrap().as_str(), "user1");
        assert!(UserId::new("").is_err());
        assert!(UserId::new("x".repeat(31)).is_err());
    }

    #[test]
    fn test_city_ref_requires_both_parts() {
        assert!(CityRef::new("Vancouver", "").is_err());
        let city = CityRef::new("Vancouver", "British Columbia").unwrap();
        assert_eq!(city.to_string(), "Vancouver, British Columbia");
    }

    #[test]
    fn test_follow_clause_parse() {
        assert_eq!(FollowClause::parse(Some("AND")), FollowClause::And);
        assert_eq!(FollowClause::parse(Some("and")), FollowClause::And);
        assert_eq!(FollowClause::parse(Some("OR")), FollowClause::Or);
        assert_eq!(FollowClause::parse(None), FollowClause::Or);
    }
}
