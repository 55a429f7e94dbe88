//! Application State
//!
//! 包含所有端口以及 Command/Query Handlers

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateMenuItemHandler, CreateMenuItemReviewHandler, CreateOwnerHandler,
    CreateRestaurantHandler, CreateRestaurantReviewHandler, CreateUserHandler,
    DeleteMenuItemHandler, DeleteMenuItemReviewHandler, DeleteOwnerHandler,
    DeleteRestaurantHandler, DeleteRestaurantReviewHandler, DeleteUserHandler,
    FollowUserHandler, ResetDatabaseHandler, UnfollowUserHandler, UpdateMenuItemCostHandler,
    UpdateRestaurantHandler, UpdateRestaurantReviewHandler, UpdateUserHandler,
    VerifyEligibleUsersHandler, VerifyUserHandler,
    // Query handlers
    CheapestMenuItemsByTypeHandler, CheckConnectionHandler, FindUsersByCityHandler,
    ListAttributesHandler, ListCitiesHandler, ListMenuItemReviewsHandler,
    ListMenuItemTypesHandler, ListMenuItemsHandler, ListOwnersHandler, ListRestaurantsHandler,
    ListTablesHandler, ListVerifiedUsersHandler, MostExpensiveMenuItemsByTypeHandler,
    ProjectTableHandler, RestaurantsOfferingAllTypesHandler, SearchUsersHandler,
    ViewFollowsHandler, ViewRestaurantReviewsHandler,
    // Ports
    CatalogPort, CityRepositoryPort, DatabaseAdminPort, FollowsRepositoryPort,
    MenuItemRepositoryPort, OwnerRepositoryPort, RestaurantRepositoryPort, ReviewRepositoryPort,
    UserRepositoryPort, VerificationNumberSource, VerificationRepositoryPort,
};
use crate::infrastructure::adapters::RandomVerificationNumbers;
use crate::infrastructure::persistence::sqlite::{
    DbPool, SqliteCatalog, SqliteCityRepository, SqliteDatabaseAdmin, SqliteFollowsRepository,
    SqliteMenuItemRepository, SqliteOwnerRepository, SqliteRestaurantRepository,
    SqliteReviewRepository, SqliteUserRepository, SqliteVerificationRepository,
};

/// 出站端口集合
#[derive(Clone)]
pub struct Ports {
    pub admin: Arc<dyn DatabaseAdminPort>,
    pub owners: Arc<dyn OwnerRepositoryPort>,
    pub cities: Arc<dyn CityRepositoryPort>,
    pub users: Arc<dyn UserRepositoryPort>,
    pub follows: Arc<dyn FollowsRepositoryPort>,
    pub verifications: Arc<dyn VerificationRepositoryPort>,
    pub restaurants: Arc<dyn RestaurantRepositoryPort>,
    pub menu_items: Arc<dyn MenuItemRepositoryPort>,
    pub reviews: Arc<dyn ReviewRepositoryPort>,
    pub catalog: Arc<dyn CatalogPort>,
    pub verification_numbers: Arc<dyn VerificationNumberSource>,
}

impl Ports {
    /// 全部端口都由同一个 SQLite 连接池支撑
    pub fn sqlite(pool: DbPool) -> Self {
        Self {
            admin: Arc::new(SqliteDatabaseAdmin::new(pool.clone())),
            owners: Arc::new(SqliteOwnerRepository::new(pool.clone())),
            cities: Arc::new(SqliteCityRepository::new(pool.clone())),
            users: Arc::new(SqliteUserRepository::new(pool.clone())),
            follows: Arc::new(SqliteFollowsRepository::new(pool.clone())),
            verifications: Arc::new(SqliteVerificationRepository::new(pool.clone())),
            restaurants: Arc::new(SqliteRestaurantRepository::new(pool.clone())),
            menu_items: Arc::new(SqliteMenuItemRepository::new(pool.clone())),
            reviews: Arc::new(SqliteReviewRepository::new(pool.clone())),
            catalog: Arc::new(SqliteCatalog::new(pool)),
            verification_numbers: Arc::new(RandomVerificationNumbers::new()),
        }
    }
}

/// 用户认证参数
#[derive(Debug, Clone, Copy)]
pub struct VerificationSettings {
    /// 评论数超过该值的用户才会被批量认证
    pub review_threshold: u32,
    /// 单个用户最多抽取编号的次数
    pub max_attempts: u32,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            review_threshold: 3,
            max_attempts: 32,
        }
    }
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub ports: Ports,

    // ========== Command Handlers ==========
    pub reset_database_handler: ResetDatabaseHandler,
    pub create_owner_handler: CreateOwnerHandler,
    pub delete_owner_handler: DeleteOwnerHandler,
    pub create_user_handler: CreateUserHandler,
    pub update_user_handler: UpdateUserHandler,
    pub delete_user_handler: DeleteUserHandler,
    pub follow_user_handler: FollowUserHandler,
    pub unfollow_user_handler: UnfollowUserHandler,
    pub verify_user_handler: VerifyUserHandler,
    pub verify_eligible_users_handler: VerifyEligibleUsersHandler,
    pub create_restaurant_handler: CreateRestaurantHandler,
    pub update_restaurant_handler: UpdateRestaurantHandler,
    pub delete_restaurant_handler: DeleteRestaurantHandler,
    pub create_menu_item_handler: CreateMenuItemHandler,
    pub delete_menu_item_handler: DeleteMenuItemHandler,
    pub update_menu_item_cost_handler: UpdateMenuItemCostHandler,
    pub create_menu_item_review_handler: CreateMenuItemReviewHandler,
    pub delete_menu_item_review_handler: DeleteMenuItemReviewHandler,
    pub create_restaurant_review_handler: CreateRestaurantReviewHandler,
    pub update_restaurant_review_handler: UpdateRestaurantReviewHandler,
    pub delete_restaurant_review_handler: DeleteRestaurantReviewHandler,

    // ========== Query Handlers ==========
    pub check_connection_handler: CheckConnectionHandler,
    pub list_owners_handler: ListOwnersHandler,
    pub list_cities_handler: ListCitiesHandler,
    pub search_users_handler: SearchUsersHandler,
    pub find_users_by_city_handler: FindUsersByCityHandler,
    pub view_follows_handler: ViewFollowsHandler,
    pub list_verified_users_handler: ListVerifiedUsersHandler,
    pub list_tables_handler: ListTablesHandler,
    pub list_attributes_handler: ListAttributesHandler,
    pub project_table_handler: ProjectTableHandler,
    pub list_restaurants_handler: ListRestaurantsHandler,
    pub list_menu_items_handler: ListMenuItemsHandler,
    pub list_menu_item_types_handler: ListMenuItemTypesHandler,
    pub cheapest_menu_items_handler: CheapestMenuItemsByTypeHandler,
    pub most_expensive_menu_items_handler: MostExpensiveMenuItemsByTypeHandler,
    pub restaurants_offering_all_types_handler: RestaurantsOfferingAllTypesHandler,
    pub list_menu_item_reviews_handler: ListMenuItemReviewsHandler,
    pub view_restaurant_reviews_handler: ViewRestaurantReviewsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(ports: Ports, verification: VerificationSettings) -> Self {
        let p = ports.clone();
        Self {
            // Command handlers
            reset_database_handler: ResetDatabaseHandler::new(p.admin.clone()),
            create_owner_handler: CreateOwnerHandler::new(p.owners.clone()),
            delete_owner_handler: DeleteOwnerHandler::new(p.owners.clone()),
            create_user_handler: CreateUserHandler::new(p.users.clone(), p.cities.clone()),
            update_user_handler: UpdateUserHandler::new(p.users.clone(), p.cities.clone()),
            delete_user_handler: DeleteUserHandler::new(p.users.clone()),
            follow_user_handler: FollowUserHandler::new(p.users.clone(), p.follows.clone()),
            unfollow_user_handler: UnfollowUserHandler::new(p.users.clone(), p.follows.clone()),
            verify_user_handler: VerifyUserHandler::new(
                p.verifications.clone(),
                p.verification_numbers.clone(),
                verification.max_attempts,
            ),
            verify_eligible_users_handler: VerifyEligibleUsersHandler::new(
                p.verifications.clone(),
                p.verification_numbers.clone(),
                verification.max_attempts,
                verification.review_threshold,
            ),
            create_restaurant_handler: CreateRestaurantHandler::new(p.restaurants.clone()),
            update_restaurant_handler: UpdateRestaurantHandler::new(p.restaurants.clone()),
            delete_restaurant_handler: DeleteRestaurantHandler::new(p.restaurants.clone()),
            create_menu_item_handler: CreateMenuItemHandler::new(p.menu_items.clone()),
            delete_menu_item_handler: DeleteMenuItemHandler::new(p.menu_items.clone()),
            update_menu_item_cost_handler: UpdateMenuItemCostHandler::new(p.menu_items.clone()),
            create_menu_item_review_handler: CreateMenuItemReviewHandler::new(p.reviews.clone()),
            delete_menu_item_review_handler: DeleteMenuItemReviewHandler::new(p.reviews.clone()),
            create_restaurant_review_handler: CreateRestaurantReviewHandler::new(p.reviews.clone()),
            update_restaurant_review_handler: UpdateRestaurantReviewHandler::new(p.reviews.clone()),
            delete_restaurant_review_handler: DeleteRestaurantReviewHandler::new(p.reviews.clone()),

            // Query handlers
            check_connection_handler: CheckConnectionHandler::new(p.admin.clone()),
            list_owners_handler: ListOwnersHandler::new(p.owners.clone()),
            list_cities_handler: ListCitiesHandler::new(p.cities.clone()),
            search_users_handler: SearchUsersHandler::new(p.users.clone()),
            find_users_by_city_handler: FindUsersByCityHandler::new(p.users.clone()),
            view_follows_handler: ViewFollowsHandler::new(p.follows.clone()),
            list_verified_users_handler: ListVerifiedUsersHandler::new(p.verifications.clone()),
            list_tables_handler: ListTablesHandler::new(p.catalog.clone()),
            list_attributes_handler: ListAttributesHandler::new(p.catalog.clone()),
            project_table_handler: ProjectTableHandler::new(p.catalog.clone()),
            list_restaurants_handler: ListRestaurantsHandler::new(p.restaurants.clone()),
            list_menu_items_handler: ListMenuItemsHandler::new(p.menu_items.clone()),
            list_menu_item_types_handler: ListMenuItemTypesHandler::new(p.menu_items.clone()),
            cheapest_menu_items_handler: CheapestMenuItemsByTypeHandler::new(p.menu_items.clone()),
            most_expensive_menu_items_handler: MostExpensiveMenuItemsByTypeHandler::new(
                p.menu_items.clone(),
            ),
            restaurants_offering_all_types_handler: RestaurantsOfferingAllTypesHandler::new(
                p.menu_items.clone(),
            ),
            list_menu_item_reviews_handler: ListMenuItemReviewsHandler::new(p.reviews.clone()),
            view_restaurant_reviews_handler: ViewRestaurantReviewsHandler::new(p.reviews),

            // Ports
            ports,
        }
    }

    /// 由 SQLite 连接池直接构建
    pub fn from_pool(pool: DbPool, verification: VerificationSettings) -> Self {
        Self::new(Ports::sqlite(pool), verification)
    }
}
