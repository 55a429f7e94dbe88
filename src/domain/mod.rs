//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - User Context: 评论用户、关注关系
//! - Restaurant Context: 餐厅地址、菜品价格
//! - Review Context: 评分
//!
//! 以及两个共享模块：认证编号、数据库目录投影

pub mod catalog;
pub mod restaurant;
pub mod review;
pub mod user;
pub mod verification;

pub use catalog::{quote_identifier, resolve_identifier, CatalogTable, Projection, ProjectionError};
pub use restaurant::{Cost, PostalCode, StreetAddress};
pub use review::{overall_rating, MenuItemRatings, Rating, RestaurantRatings};
pub use user::{CityRef, FollowClause, UserId};
pub use verification::VerificationNumber;
