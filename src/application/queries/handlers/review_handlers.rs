//! Review Query Handlers

use std::sync::Arc;

use serde::Serialize;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    MenuItemReviewRecord, RestaurantReviewFilter, RestaurantReviewRecord, ReviewMetadata,
    ReviewRepositoryPort,
};
use crate::application::queries::{ListMenuItemReviews, ViewRestaurantReviews};
use crate::domain::UserId;

/// ListMenuItemReviews Handler
pub struct ListMenuItemReviewsHandler {
    review_repo: Arc<dyn ReviewRepositoryPort>,
}

impl ListMenuItemReviewsHandler {
    pub fn new(review_repo: Arc<dyn ReviewRepositoryPort>) -> Self {
        Self { review_repo }
    }

    pub async fn handle(
        &self,
        _query: ListMenuItemReviews,
    ) -> Result<Vec<MenuItemReviewRecord>, ApplicationError> {
        Ok(self.review_repo.find_menu_item_reviews().await?)
    }
}

/// 餐厅评论视图：评论行 + 按用户/餐厅过滤时的汇总
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantReviewView {
    pub rows: Vec<RestaurantReviewRecord>,
    pub metadata: Option<ReviewMetadata>,
}

/// ViewRestaurantReviews Handler
pub struct ViewRestaurantReviewsHandler {
    review_repo: Arc<dyn ReviewRepositoryPort>,
}

impl ViewRestaurantReviewsHandler {
    pub fn new(review_repo: Arc<dyn ReviewRepositoryPort>) -> Self {
        Self { review_repo }
    }

    fn parse_filter(query: &ViewRestaurantReviews) -> Result<RestaurantReviewFilter, ApplicationError> {
        let value = query.value.as_deref().map(str::trim).unwrap_or_default();
        let filter_type = query.filter_type.as_deref().map(str::trim).unwrap_or_default();

        match filter_type.to_ascii_lowercase().as_str() {
            "" => Ok(RestaurantReviewFilter::All),
            "user" => UserId::new(value)
                .map(RestaurantReviewFilter::ByUser)
                .map_err(ApplicationError::validation),
            "restaurant" => value
                .parse::<i64>()
                .map(RestaurantReviewFilter::ByRestaurant)
                .map_err(|_| ApplicationError::validation("Business number must be a number")),
            other => Err(ApplicationError::validation(format!(
                "Unknown review filter '{}', expected 'user' or 'restaurant'",
                other
            ))),
        }
    }

    pub async fn handle(
        &self,
        query: ViewRestaurantReviews,
    ) -> Result<RestaurantReviewView, ApplicationError> {
        let filter = Self::parse_filter(&query)?;

        let metadata = match &filter {
            RestaurantReviewFilter::All => None,
            RestaurantReviewFilter::ByUser(_) => Some(
                self.review_repo
                    .find_review_metadata(&filter)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("Could not find user with given ID!"))?,
            ),
            RestaurantReviewFilter::ByRestaurant(_) => Some(
                self.review_repo
                    .find_review_metadata(&filter)
                    .await?
                    .ok_or_else(|| {
                        ApplicationError::not_found(
                            "Could not find restaurant with given business number!",
                        )
                    })?,
            ),
        };

        let rows = self.review_repo.find_restaurant_reviews(&filter).await?;
        Ok(RestaurantReviewView { rows, metadata })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(filter_type: Option<&str>, value: Option<&str>) -> ViewRestaurantReviews {
        ViewRestaurantReviews {
            filter_type: filter_type.map(str::to_string),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            ViewRestaurantReviewsHandler::parse_filter(&query(None, None)).unwrap(),
            RestaurantReviewFilter::All
        );
        assert_eq!(
            ViewRestaurantReviewsHandler::parse_filter(&query(Some("User"), Some("user1"))).unwrap(),
            RestaurantReviewFilter::ByUser(UserId::new("user1").unwrap())
        );
        assert_eq!(
            ViewRestaurantReviewsHandler::parse_filter(&query(Some("restaurant"), Some(" 123 ")))
                .unwrap(),
            RestaurantReviewFilter::ByRestaurant(123)
        );
        assert!(ViewRestaurantReviewsHandler::parse_filter(&query(Some("restaurant"), Some("abc"))).is_err());
        assert!(ViewRestaurantReviewsHandler::parse_filter(&query(Some("user"), None)).is_err());
        assert!(ViewRestaurantReviewsHandler::parse_filter(&query(Some("city"), Some("x"))).is_err());
    }
}
