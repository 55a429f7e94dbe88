//! Restaurant Context - 餐厅限界上下文
//!
//! 职责:
//! - 餐厅地址（门牌号 + 街道 + 邮编）唯一标识一条 Address 记录
//! - 菜品价格约束

mod value_objects;

pub use value_objects::{Cost, PostalCode, StreetAddress};
