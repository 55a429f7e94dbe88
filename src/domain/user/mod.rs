//! User Context - 评论用户限界上下文
//!
//! 职责:
//! - 用户标识与所在城市
//! - 关注关系查询条件

mod value_objects;

pub use value_objects::{CityRef, FollowClause, UserId};
