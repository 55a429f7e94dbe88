//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）
//!
//! 读模型（`*Record`）直接序列化为 JSON，字段名与数据库列名一致

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{
    CityRef, Cost, MenuItemRatings, PostalCode, Rating, RestaurantRatings, StreetAddress, UserId,
    VerificationNumber,
};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Referenced entity does not exist: {0}")]
    ForeignKey(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Database Administration
// ============================================================================

/// 数据库管理端口：连通性检查与重建
#[async_trait]
pub trait DatabaseAdminPort: Send + Sync {
    /// 取一个连接执行 `SELECT 1`
    async fn ping(&self) -> Result<(), RepositoryError>;

    /// 删除全部表，重建结构并写入演示数据（单个事务）
    async fn reset_and_seed(&self) -> Result<(), RepositoryError>;
}

// ============================================================================
// Owner Repository
// ============================================================================

/// 餐厅业主
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OwnerRecord {
    #[serde(rename = "SIN")]
    pub sin: i64,
    pub name: Option<String>,
}

/// Owner Repository Port
#[async_trait]
pub trait OwnerRepositoryPort: Send + Sync {
    /// 获取所有业主
    async fn find_all(&self) -> Result<Vec<OwnerRecord>, RepositoryError>;

    /// 新增业主，SIN 重复时返回 `Duplicate`
    async fn insert(&self, owner: &OwnerRecord) -> Result<(), RepositoryError>;

    /// 删除业主，返回删除行数（餐厅的 OwnerId 置空）
    async fn delete(&self, sin: i64) -> Result<u64, RepositoryError>;
}

// ============================================================================
// City Repository
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CityRecord {
    pub name: String,
    #[serde(rename = "Province_State")]
    pub province_state: String,
    pub country: Option<String>,
}

/// City Repository Port
#[async_trait]
pub trait CityRepositoryPort: Send + Sync {
    async fn find_all(&self) -> Result<Vec<CityRecord>, RepositoryError>;

    async fn exists(&self, city: &CityRef) -> Result<bool, RepositoryError>;
}

// ============================================================================
// Review User Repository
// ============================================================================

/// 用户搜索结果（左连接认证编号）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserRecord {
    pub user_id: String,
    pub name: Option<String>,
    pub city_name: String,
    #[serde(rename = "Province_State")]
    pub province_state: String,
    pub verification_number: Option<i64>,
}

/// 按城市搜索的精简结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserSummary {
    pub user_id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_id: UserId,
    pub name: String,
    pub city: CityRef,
}

/// 部分更新：None 表示保持原值
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub user_id: UserId,
    pub name: Option<String>,
    pub city: Option<CityRef>,
}

/// Review User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    async fn exists(&self, user_id: &UserId) -> Result<bool, RepositoryError>;

    /// 新增用户，UserId 重复时返回 `Duplicate`
    async fn insert(&self, user: &NewUser) -> Result<(), RepositoryError>;

    /// UserId 不区分大小写的子串搜索
    async fn search_by_id(&self, pattern: &str) -> Result<Vec<UserRecord>, RepositoryError>;

    /// Name 不区分大小写的子串搜索
    async fn search_by_name(&self, pattern: &str) -> Result<Vec<UserRecord>, RepositoryError>;

    async fn find_by_city(&self, city: &CityRef) -> Result<Vec<UserSummary>, RepositoryError>;

    /// 返回更新行数
    async fn update(&self, update: &UserUpdate) -> Result<u64, RepositoryError>;

    /// 返回删除行数（Follows、Verified_User 级联删除，Review.UserId 置空）
    async fn delete(&self, user_id: &UserId) -> Result<u64, RepositoryError>;
}

// ============================================================================
// Follows Repository
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowRecord {
    #[serde(rename = "UserId1")]
    pub follower: String,
    #[serde(rename = "UserId2")]
    pub followee: String,
}

/// 关注关系查询条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowFilter {
    All,
    Follower(UserId),
    Followee(UserId),
    Pair {
        follower: UserId,
        followee: UserId,
        clause: crate::domain::FollowClause,
    },
}

/// Follows Repository Port
#[async_trait]
pub trait FollowsRepositoryPort: Send + Sync {
    async fn exists(&self, follower: &UserId, followee: &UserId) -> Result<bool, RepositoryError>;

    /// 主键冲突时返回 `Duplicate`
    async fn insert(&self, follower: &UserId, followee: &UserId) -> Result<(), RepositoryError>;

    async fn delete(&self, follower: &UserId, followee: &UserId) -> Result<u64, RepositoryError>;

    async fn find(&self, filter: &FollowFilter) -> Result<Vec<FollowRecord>, RepositoryError>;
}

// ============================================================================
// Verification Repository
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifiedUserRecord {
    pub user_id: String,
    pub verification_number: i64,
}

/// 单次认证尝试的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyAttempt {
    /// 写入成功
    Inserted,
    /// 用户已认证
    AlreadyVerified,
    /// 用户不存在
    UserMissing,
    /// 编号已被占用，需重新抽取
    NumberTaken,
}

/// Verification Repository Port
#[async_trait]
pub trait VerificationRepositoryPort: Send + Sync {
    /// 评论数严格大于 `review_threshold` 的用户
    async fn find_eligible(&self, review_threshold: u32) -> Result<Vec<String>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<VerifiedUserRecord>, RepositoryError>;

    /// 在一个事务内检查用户、检查编号并写入
    async fn try_verify(
        &self,
        user_id: &UserId,
        number: VerificationNumber,
    ) -> Result<VerifyAttempt, RepositoryError>;
}

// ============================================================================
// Restaurant Repository
// ============================================================================

/// 餐厅列表行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestaurantListing {
    pub business_number: i64,
    pub name: Option<String>,
    pub owner_id: Option<i64>,
    pub owner: Option<String>,
    /// 门牌号 街道 邮编
    pub address: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub business_number: i64,
    pub name: String,
    pub address: StreetAddress,
    pub city_name: String,
    pub owner_id: i64,
}

/// 部分更新：None 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct RestaurantUpdate {
    pub business_number: i64,
    pub name: Option<String>,
    pub house_number: Option<i64>,
    pub street_name: Option<String>,
    pub postal_code: Option<PostalCode>,
    pub city_name: Option<String>,
    pub owner_id: Option<i64>,
}

impl RestaurantUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.house_number.is_none()
            && self.street_name.is_none()
            && self.postal_code.is_none()
            && self.city_name.is_none()
            && self.owner_id.is_none()
    }

    pub fn touches_address(&self) -> bool {
        self.house_number.is_some() || self.street_name.is_some() || self.postal_code.is_some()
    }
}

/// 餐厅写入前置检查失败的原因（按检查顺序排列）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestaurantRejection {
    RestaurantMissing,
    PostalAreaMissing,
    CityMissing,
    AddressTaken,
    OwnerMissing,
    AddressIncomplete,
}

impl RestaurantRejection {
    pub fn message(&self) -> &'static str {
        match self {
            RestaurantRejection::RestaurantMissing => {
                "Could not find restaurant with given business number!"
            }
            RestaurantRejection::PostalAreaMissing => "Postal area does not exist!",
            RestaurantRejection::CityMissing => "City does not exist!",
            RestaurantRejection::AddressTaken => {
                "There is already a restaurant with the same address!"
            }
            RestaurantRejection::OwnerMissing => "Cannot find owner with matching sin!",
            RestaurantRejection::AddressIncomplete => {
                "Restaurant has no address; house number, street name and postal code are all required"
            }
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            RestaurantRejection::RestaurantMissing => 0,
            RestaurantRejection::PostalAreaMissing => -1,
            RestaurantRejection::CityMissing => -2,
            RestaurantRejection::AddressTaken => -3,
            RestaurantRejection::OwnerMissing => -4,
            RestaurantRejection::AddressIncomplete => -5,
        }
    }
}

impl std::fmt::Display for RestaurantRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// 餐厅写入错误：前置检查拒绝或数据库错误
#[derive(Debug, Error)]
pub enum RestaurantWriteError {
    #[error("{0}")]
    Rejected(RestaurantRejection),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Restaurant Repository Port
#[async_trait]
pub trait RestaurantRepositoryPort: Send + Sync {
    async fn find_all(&self) -> Result<Vec<RestaurantListing>, RepositoryError>;

    /// 依次检查 邮编 → 城市 → 地址 → 业主，全部通过后写入 Address 与 Restaurant
    async fn insert(&self, restaurant: &NewRestaurant) -> Result<(), RestaurantWriteError>;

    /// 与 insert 相同的检查顺序，仅针对提供的字段
    async fn update(&self, update: &RestaurantUpdate) -> Result<(), RestaurantWriteError>;

    /// 删除餐厅及其评论，地址无其他餐厅引用时一并删除；餐厅不存在返回 false
    async fn delete(&self, business_number: i64) -> Result<bool, RepositoryError>;
}

// ============================================================================
// Menu Item Repository
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MenuItemRecord {
    pub business_number: i64,
    pub name: String,
    #[serde(rename = "Type")]
    pub item_type: String,
    pub cost: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub business_number: i64,
    pub name: String,
    pub item_type: String,
    pub cost: Cost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestaurantSummary {
    pub business_number: i64,
    pub name: Option<String>,
}

/// Menu Item Repository Port（含菜品报表查询）
#[async_trait]
pub trait MenuItemRepositoryPort: Send + Sync {
    async fn find_all(&self) -> Result<Vec<MenuItemRecord>, RepositoryError>;

    /// Menu_Item_Type 受控词表
    async fn find_types(&self) -> Result<Vec<String>, RepositoryError>;

    /// 餐厅或类型不存在时返回 `ForeignKey`，主键冲突返回 `Duplicate`
    async fn insert(&self, item: &NewMenuItem) -> Result<(), RepositoryError>;

    /// 删除菜品及其评论；菜品不存在返回 false
    async fn delete(&self, business_number: i64, name: &str) -> Result<bool, RepositoryError>;

    async fn update_cost(
        &self,
        business_number: i64,
        name: &str,
        cost: Cost,
    ) -> Result<bool, RepositoryError>;

    /// 每个类型中价格最低的菜品（并列全部返回）
    async fn find_cheapest_by_type(&self) -> Result<Vec<MenuItemRecord>, RepositoryError>;

    /// 每个类型中价格最高的菜品（并列全部返回）
    async fn find_most_expensive_by_type(&self) -> Result<Vec<MenuItemRecord>, RepositoryError>;

    /// 关系除法：菜单覆盖全部给定类型的餐厅；类型为空表示全部类型
    async fn find_restaurants_offering_all(
        &self,
        types: &[String],
    ) -> Result<Vec<RestaurantSummary>, RepositoryError>;
}

// ============================================================================
// Review Repository
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MenuItemReviewRecord {
    pub review_number: i64,
    pub business_number: i64,
    pub menu_item_name: String,
    pub presentation_rating: Option<i64>,
    pub taste_rating: Option<i64>,
    pub portion_size_rating: Option<i64>,
    pub content: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMenuItemReview {
    pub review_number: i64,
    pub business_number: i64,
    pub menu_item_name: String,
    pub ratings: MenuItemRatings,
    pub content: String,
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestaurantReviewRecord {
    pub review_number: i64,
    pub business_number: i64,
    pub user_id: Option<String>,
    pub ambience_rating: Option<i64>,
    pub cleanliness_rating: Option<i64>,
    pub service_rating: Option<i64>,
    /// 三项评分的四舍五入平均值
    pub overall_rating: Option<i64>,
    pub content: Option<String>,
}

/// 餐厅评论查询条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestaurantReviewFilter {
    All,
    ByUser(UserId),
    ByRestaurant(i64),
}

/// 按用户或餐厅查询时附带的汇总信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReviewMetadata {
    User {
        #[serde(rename = "UserId")]
        user_id: String,
        #[serde(rename = "Name")]
        name: Option<String>,
        #[serde(rename = "ReviewCount")]
        review_count: i64,
    },
    Restaurant {
        #[serde(rename = "BusinessNumber")]
        business_number: i64,
        #[serde(rename = "Name")]
        name: Option<String>,
        #[serde(rename = "ReviewCount")]
        review_count: i64,
    },
}

#[derive(Debug, Clone)]
pub struct NewRestaurantReview {
    pub review_number: i64,
    pub business_number: i64,
    pub user_id: Option<UserId>,
    pub ratings: RestaurantRatings,
    pub content: String,
}

/// 部分更新：None 表示保持原值
#[derive(Debug, Clone)]
pub struct RestaurantReviewUpdate {
    pub review_number: i64,
    pub ambience: Option<Rating>,
    pub cleanliness: Option<Rating>,
    pub service: Option<Rating>,
    pub content: Option<String>,
}

impl RestaurantReviewUpdate {
    pub fn touches_ratings(&self) -> bool {
        self.ambience.is_some() || self.cleanliness.is_some() || self.service.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.touches_ratings() && self.content.is_none()
    }
}

/// Review Repository Port
///
/// Review 与其明细行（Restaurant_Review / Menu_Item_Review）总是在同一事务中写入和删除
#[async_trait]
pub trait ReviewRepositoryPort: Send + Sync {
    async fn review_exists(&self, review_number: i64) -> Result<bool, RepositoryError>;

    async fn find_menu_item_reviews(&self) -> Result<Vec<MenuItemReviewRecord>, RepositoryError>;

    async fn insert_menu_item_review(
        &self,
        review: &NewMenuItemReview,
    ) -> Result<(), RepositoryError>;

    /// 两条删除都影响到行时才提交，否则回滚并返回 false
    async fn delete_menu_item_review(&self, review_number: i64) -> Result<bool, RepositoryError>;

    async fn find_restaurant_reviews(
        &self,
        filter: &RestaurantReviewFilter,
    ) -> Result<Vec<RestaurantReviewRecord>, RepositoryError>;

    async fn find_review_metadata(
        &self,
        filter: &RestaurantReviewFilter,
    ) -> Result<Option<ReviewMetadata>, RepositoryError>;

    async fn insert_restaurant_review(
        &self,
        review: &NewRestaurantReview,
    ) -> Result<(), RepositoryError>;

    /// 评论不存在返回 false
    async fn update_restaurant_review(
        &self,
        update: &RestaurantReviewUpdate,
    ) -> Result<bool, RepositoryError>;

    /// 两条删除都影响到行时才提交，否则回滚并返回 false
    async fn delete_restaurant_review(&self, review_number: i64)
        -> Result<bool, RepositoryError>;
}
