//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod catalog;
mod repositories;
mod verification;

pub use catalog::{CatalogPort, ProjectedRow};
pub use repositories::{
    CityRecord, CityRepositoryPort, DatabaseAdminPort, FollowFilter, FollowRecord,
    FollowsRepositoryPort, MenuItemRecord, MenuItemRepositoryPort, MenuItemReviewRecord,
    NewMenuItem, NewMenuItemReview, NewRestaurant, NewRestaurantReview, NewUser, OwnerRecord,
    OwnerRepositoryPort, RepositoryError, RestaurantListing, RestaurantRejection,
    RestaurantRepositoryPort, RestaurantReviewFilter, RestaurantReviewRecord,
    RestaurantReviewUpdate, RestaurantSummary, RestaurantUpdate, RestaurantWriteError,
    ReviewMetadata, ReviewRepositoryPort, UserRecord, UserRepositoryPort, UserSummary,
    UserUpdate, VerificationRepositoryPort, VerifiedUserRecord, VerifyAttempt,
};
pub use verification::VerificationNumberSource;
