//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（各实体 Repository、Catalog、认证编号来源）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Admin commands
    ResetDatabase,
    // Owner commands
    CreateOwner,
    DeleteOwner,
    // User commands
    CreateUser,
    DeleteUser,
    FollowUser,
    UnfollowUser,
    UpdateUser,
    // Verification commands
    VerifyEligibleUsers,
    VerifyUser,
    // Restaurant commands
    CreateMenuItem,
    CreateRestaurant,
    DeleteMenuItem,
    DeleteRestaurant,
    UpdateMenuItemCost,
    UpdateRestaurant,
    // Review commands
    CreateMenuItemReview,
    CreateRestaurantReview,
    DeleteMenuItemReview,
    DeleteRestaurantReview,
    UpdateRestaurantReview,
    // Handlers
    handlers::{
        CreateMenuItemHandler, CreateMenuItemReviewHandler, CreateOwnerHandler,
        CreateRestaurantHandler, CreateRestaurantReviewHandler, CreateUserHandler,
        CreateUserOutcome, DeleteMenuItemHandler, DeleteMenuItemReviewHandler,
        DeleteOwnerHandler, DeleteRestaurantHandler, DeleteRestaurantReviewHandler,
        DeleteUserHandler, FollowOutcome, FollowUserHandler, ResetDatabaseHandler,
        UnfollowOutcome, UnfollowUserHandler, UpdateMenuItemCostHandler,
        UpdateRestaurantHandler, UpdateRestaurantReviewHandler, UpdateUserHandler,
        VerificationSweepReport, VerifyEligibleUsersHandler, VerifyOutcome, VerifyUserHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    CatalogPort, CityRecord, CityRepositoryPort, DatabaseAdminPort, FollowFilter, FollowRecord,
    FollowsRepositoryPort, MenuItemRecord, MenuItemRepositoryPort, MenuItemReviewRecord,
    NewMenuItem, NewMenuItemReview, NewRestaurant, NewRestaurantReview, NewUser, OwnerRecord,
    OwnerRepositoryPort, ProjectedRow, RepositoryError, RestaurantListing, RestaurantRejection,
    RestaurantRepositoryPort, RestaurantReviewFilter, RestaurantReviewRecord,
    RestaurantReviewUpdate, RestaurantSummary, RestaurantUpdate, RestaurantWriteError,
    ReviewMetadata, ReviewRepositoryPort, UserRecord, UserRepositoryPort, UserSummary,
    UserUpdate, VerificationNumberSource, VerificationRepositoryPort, VerifiedUserRecord,
    VerifyAttempt,
};

pub use queries::{
    // Admin queries
    CheckConnection,
    // Catalog queries
    ListAttributes,
    ListTables,
    ProjectTable,
    // Restaurant queries
    CheapestMenuItemsByType,
    ListMenuItemTypes,
    ListMenuItems,
    ListRestaurants,
    MostExpensiveMenuItemsByType,
    RestaurantsOfferingAllTypes,
    // Review queries
    ListMenuItemReviews,
    ViewRestaurantReviews,
    // User queries
    FindUsersByCity,
    ListCities,
    ListOwners,
    ListVerifiedUsers,
    SearchUsers,
    UserSearch,
    ViewFollows,
    // Handlers
    handlers::{
        CheapestMenuItemsByTypeHandler, CheckConnectionHandler, FindUsersByCityHandler,
        ListAttributesHandler, ListCitiesHandler, ListMenuItemReviewsHandler,
        ListMenuItemTypesHandler, ListMenuItemsHandler, ListOwnersHandler,
        ListRestaurantsHandler, ListTablesHandler, ListVerifiedUsersHandler,
        MostExpensiveMenuItemsByTypeHandler, ProjectTableHandler, RestaurantReviewView,
        RestaurantsOfferingAllTypesHandler, SearchUsersHandler, ViewFollowsHandler,
        ViewRestaurantReviewsHandler,
    },
};
