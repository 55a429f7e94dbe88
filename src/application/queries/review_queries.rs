//! Review Queries

#[derive(Debug, Clone)]
pub struct ListMenuItemReviews;

/// 按用户或餐厅过滤餐厅评论
///
/// `filter_type` 为 `user` / `restaurant`，缺省时返回全部评论
#[derive(Debug, Clone, Default)]
pub struct ViewRestaurantReviews {
    pub filter_type: Option<String>,
    pub value: Option<String>,
}
