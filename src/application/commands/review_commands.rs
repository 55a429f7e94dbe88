//! Review Commands

#[derive(Debug, Clone)]
pub struct CreateMenuItemReview {
    pub review_number: i64,
    pub business_number: i64,
    pub menu_item_name: String,
    pub presentation_rating: i64,
    pub taste_rating: i64,
    pub portion_size_rating: i64,
    pub content: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DeleteMenuItemReview {
    pub review_number: i64,
}

#[derive(Debug, Clone)]
pub struct CreateRestaurantReview {
    pub review_number: i64,
    pub business_number: i64,
    pub user_id: Option<String>,
    pub ambience_rating: i64,
    pub cleanliness_rating: i64,
    pub service_rating: i64,
    pub content: String,
}

/// 部分更新餐厅评论：None 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct UpdateRestaurantReview {
    pub review_number: i64,
    pub ambience_rating: Option<i64>,
    pub cleanliness_rating: Option<i64>,
    pub service_rating: Option<i64>,
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DeleteRestaurantReview {
    pub review_number: i64,
}
