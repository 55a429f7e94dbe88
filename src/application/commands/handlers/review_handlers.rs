//! Review Command Handlers
//!
//! Review 行与明细行（Menu_Item_Review / Restaurant_Review）成对写入、成对删除

use std::sync::Arc;

use crate::application::commands::{
    CreateMenuItemReview, CreateRestaurantReview, DeleteMenuItemReview, DeleteRestaurantReview,
    UpdateRestaurantReview,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    NewMenuItemReview, NewRestaurantReview, RepositoryError, RestaurantReviewUpdate,
    ReviewRepositoryPort,
};
use crate::domain::{MenuItemRatings, Rating, RestaurantRatings, UserId};

const MAX_CONTENT_LEN: usize = 4000;
const REVIEW_EXISTS: &str = "There is already a review with the same review number!";
const REVIEW_MISSING: &str = "No review with that review number exists!";

fn require_review_number(review_number: i64) -> Result<i64, ApplicationError> {
    if review_number <= 0 {
        return Err(ApplicationError::validation(
            "Review number must be a positive number",
        ));
    }
    Ok(review_number)
}

fn parse_content(raw: &str) -> Result<String, ApplicationError> {
    if raw.chars().count() > MAX_CONTENT_LEN {
        return Err(ApplicationError::validation(
            "Review content cannot be longer than 4000 characters",
        ));
    }
    Ok(raw.to_string())
}

/// 空字符串视为匿名评论
fn parse_author(raw: Option<String>) -> Result<Option<UserId>, ApplicationError> {
    raw.filter(|s| !s.trim().is_empty())
        .map(UserId::new)
        .transpose()
        .map_err(ApplicationError::validation)
}

/// 主键冲突统一成相同的提示
fn map_insert_error(err: RepositoryError) -> ApplicationError {
    match err {
        RepositoryError::Duplicate(_) => ApplicationError::conflict(REVIEW_EXISTS),
        other => other.into(),
    }
}

// ============================================================================
// Menu Item Review
// ============================================================================

/// CreateMenuItemReview Handler
pub struct CreateMenuItemReviewHandler {
    review_repo: Arc<dyn ReviewRepositoryPort>,
}

impl CreateMenuItemReviewHandler {
    pub fn new(review_repo: Arc<dyn ReviewRepositoryPort>) -> Self {
        Self { review_repo }
    }

    pub async fn handle(&self, command: CreateMenuItemReview) -> Result<(), ApplicationError> {
        let review = NewMenuItemReview {
            review_number: require_review_number(command.review_number)?,
            business_number: command.business_number,
            menu_item_name: command.menu_item_name.trim().to_string(),
            ratings: MenuItemRatings::new(
                command.presentation_rating,
                command.taste_rating,
                command.portion_size_rating,
            )
            .map_err(ApplicationError::validation)?,
            content: parse_content(&command.content)?,
            user_id: parse_author(command.user_id)?,
        };

        if self.review_repo.review_exists(review.review_number).await? {
            return Err(ApplicationError::conflict(REVIEW_EXISTS));
        }
        self.review_repo
            .insert_menu_item_review(&review)
            .await
            .map_err(map_insert_error)?;

        tracing::info!(
            review_number = review.review_number,
            business_number = review.business_number,
            menu_item = %review.menu_item_name,
            "Menu item review created"
        );
        Ok(())
    }
}

/// DeleteMenuItemReview Handler
pub struct DeleteMenuItemReviewHandler {
    review_repo: Arc<dyn ReviewRepositoryPort>,
}

impl DeleteMenuItemReviewHandler {
    pub fn new(review_repo: Arc<dyn ReviewRepositoryPort>) -> Self {
        Self { review_repo }
    }

    pub async fn handle(&self, command: DeleteMenuItemReview) -> Result<(), ApplicationError> {
        if !self
            .review_repo
            .delete_menu_item_review(command.review_number)
            .await?
        {
            return Err(ApplicationError::not_found(REVIEW_MISSING));
        }

        tracing::info!(review_number = command.review_number, "Menu item review deleted");
        Ok(())
    }
}

// ============================================================================
// Restaurant Review
// ============================================================================

/// CreateRestaurantReview Handler
pub struct CreateRestaurantReviewHandler {
    review_repo: Arc<dyn ReviewRepositoryPort>,
}

impl CreateRestaurantReviewHandler {
    pub fn new(review_repo: Arc<dyn ReviewRepositoryPort>) -> Self {
        Self { review_repo }
    }

    pub async fn handle(&self, command: CreateRestaurantReview) -> Result<(), ApplicationError> {
        let review = NewRestaurantReview {
            review_number: require_review_number(command.review_number)?,
            business_number: command.business_number,
            user_id: parse_author(command.user_id)?,
            ratings: RestaurantRatings::new(
                command.ambience_rating,
                command.cleanliness_rating,
                command.service_rating,
            )
            .map_err(ApplicationError::validation)?,
            content: parse_content(&command.content)?,
        };

        if self.review_repo.review_exists(review.review_number).await? {
            return Err(ApplicationError::conflict(REVIEW_EXISTS));
        }
        self.review_repo
            .insert_restaurant_review(&review)
            .await
            .map_err(map_insert_error)?;

        tracing::info!(
            review_number = review.review_number,
            business_number = review.business_number,
            overall = review.ratings.overall(),
            "Restaurant review created"
        );
        Ok(())
    }
}

/// UpdateRestaurantReview Handler
pub struct UpdateRestaurantReviewHandler {
    review_repo: Arc<dyn ReviewRepositoryPort>,
}

impl UpdateRestaurantReviewHandler {
    pub fn new(review_repo: Arc<dyn ReviewRepositoryPort>) -> Self {
        Self { review_repo }
    }

    pub async fn handle(&self, command: UpdateRestaurantReview) -> Result<(), ApplicationError> {
        let rating = |value: Option<i64>| {
            value
                .map(Rating::new)
                .transpose()
                .map_err(ApplicationError::validation)
        };

        let update = RestaurantReviewUpdate {
            review_number: command.review_number,
            ambience: rating(command.ambience_rating)?,
            cleanliness: rating(command.cleanliness_rating)?,
            service: rating(command.service_rating)?,
            content: command.content.as_deref().map(parse_content).transpose()?,
        };

        if update.is_empty() {
            return Err(ApplicationError::validation("Nothing to update"));
        }

        if !self.review_repo.update_restaurant_review(&update).await? {
            return Err(ApplicationError::not_found(REVIEW_MISSING));
        }

        tracing::info!(
            review_number = update.review_number,
            ratings_changed = update.touches_ratings(),
            "Restaurant review updated"
        );
        Ok(())
    }
}

/// DeleteRestaurantReview Handler
pub struct DeleteRestaurantReviewHandler {
    review_repo: Arc<dyn ReviewRepositoryPort>,
}

impl DeleteRestaurantReviewHandler {
    pub fn new(review_repo: Arc<dyn ReviewRepositoryPort>) -> Self {
        Self { review_repo }
    }

    pub async fn handle(&self, command: DeleteRestaurantReview) -> Result<(), ApplicationError> {
        if !self
            .review_repo
            .delete_restaurant_review(command.review_number)
            .await?
        {
            return Err(ApplicationError::not_found(REVIEW_MISSING));
        }

        tracing::info!(review_number = command.review_number, "Restaurant review deleted");
        Ok(())
    }
}
