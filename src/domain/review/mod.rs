//! Review Context - 评论限界上下文
//!
//! 职责:
//! - 评分取值约束
//! - 餐厅评论综合评分

mod value_objects;

pub use value_objects::{overall_rating, MenuItemRatings, Rating, RestaurantRatings};
