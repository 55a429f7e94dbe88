//! SQLite Review Repository
//!
//! 一条评论 = Review 行 + 一条明细行（Restaurant_Review 或 Menu_Item_Review）

use async_trait::async_trait;
use sqlx::FromRow;

use super::errors::{classify, db_error};
use super::{begin_write, DbPool};
use crate::application::ports::{
    MenuItemReviewRecord, NewMenuItemReview, NewRestaurantReview, RepositoryError,
    RestaurantReviewFilter, RestaurantReviewRecord, RestaurantReviewUpdate, ReviewMetadata,
    ReviewRepositoryPort,
};
use crate::domain::overall_rating;

/// 外键错误换成指明缺失对象的提示
fn classify_with(err: sqlx::Error, entity: &str, missing: &str) -> RepositoryError {
    match classify(err, entity) {
        RepositoryError::ForeignKey(_) => RepositoryError::ForeignKey(missing.to_string()),
        other => other,
    }
}

/// SQLite Review Repository
pub struct SqliteReviewRepository {
    pool: DbPool,
}

impl SqliteReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 先删明细行再删 Review 行，任一步未命中则回滚
    async fn delete_pair(&self, detail_table: &str, review_number: i64) -> Result<bool, RepositoryError> {
        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;

        let detail = sqlx::query(&format!("DELETE FROM {} WHERE ReviewNumber = ?", detail_table))
            .bind(review_number)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        if detail.rows_affected() == 0 {
            tx.rollback().await.map_err(db_error)?;
            return Ok(false);
        }

        let review = sqlx::query("DELETE FROM Review WHERE ReviewNumber = ?")
            .bind(review_number)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        if review.rows_affected() == 0 {
            tx.rollback().await.map_err(db_error)?;
            return Ok(false);
        }

        tx.commit().await.map_err(db_error)?;
        Ok(true)
    }
}

#[derive(FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct MenuItemReviewRow {
    review_number: i64,
    business_number: i64,
    menu_item_name: String,
    presentation_rating: Option<i64>,
    taste_rating: Option<i64>,
    portion_size_rating: Option<i64>,
    content: Option<String>,
    user_id: Option<String>,
}

impl From<MenuItemReviewRow> for MenuItemReviewRecord {
    fn from(row: MenuItemReviewRow) -> Self {
        MenuItemReviewRecord {
            review_number: row.review_number,
            business_number: row.business_number,
            menu_item_name: row.menu_item_name,
            presentation_rating: row.presentation_rating,
            taste_rating: row.taste_rating,
            portion_size_rating: row.portion_size_rating,
            content: row.content,
            user_id: row.user_id,
        }
    }
}

#[derive(FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct RestaurantReviewRow {
    review_number: i64,
    business_number: i64,
    user_id: Option<String>,
    ambience_rating: Option<i64>,
    cleanliness_rating: Option<i64>,
    service_rating: Option<i64>,
    content: Option<String>,
}

impl From<RestaurantReviewRow> for RestaurantReviewRecord {
    fn from(row: RestaurantReviewRow) -> Self {
        let overall = match (row.ambience_rating, row.cleanliness_rating, row.service_rating) {
            (Some(a), Some(c), Some(s)) => Some(overall_rating(a, c, s)),
            _ => None,
        };
        RestaurantReviewRecord {
            review_number: row.review_number,
            business_number: row.business_number,
            user_id: row.user_id,
            ambience_rating: row.ambience_rating,
            cleanliness_rating: row.cleanliness_rating,
            service_rating: row.service_rating,
            overall_rating: overall,
            content: row.content,
        }
    }
}

#[async_trait]
impl ReviewRepositoryPort for SqliteReviewRepository {
    async fn review_exists(&self, review_number: i64) -> Result<bool, RepositoryError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM Review WHERE ReviewNumber = ?")
            .bind(review_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.is_some())
    }

    async fn find_menu_item_reviews(&self) -> Result<Vec<MenuItemReviewRecord>, RepositoryError> {
        let rows: Vec<MenuItemReviewRow> = sqlx::query_as(
            r#"
            SELECT
                MIR.ReviewNumber, MIR.BusinessNumber, MIR.MenuItemName,
                MIR.PresentationRating, MIR.TasteRating, MIR.PortionSizeRating,
                R.Content, R.UserId
            FROM Menu_Item_Review MIR
            JOIN Review R ON R.ReviewNumber = MIR.ReviewNumber
            ORDER BY MIR.ReviewNumber
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(MenuItemReviewRecord::from).collect())
    }

    async fn insert_menu_item_review(
        &self,
        review: &NewMenuItemReview,
    ) -> Result<(), RepositoryError> {
        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;

        sqlx::query("INSERT INTO Review (ReviewNumber, Content, UserId) VALUES (?, ?, ?)")
            .bind(review.review_number)
            .bind(&review.content)
            .bind(review.user_id.as_ref().map(|u| u.as_str()))
            .execute(&mut *tx)
            .await
            .map_err(|e| classify_with(e, "Review", "Review author does not exist"))?;

        sqlx::query(
            r#"
            INSERT INTO Menu_Item_Review
                (ReviewNumber, BusinessNumber, MenuItemName, PresentationRating, TasteRating, PortionSizeRating)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.review_number)
        .bind(review.business_number)
        .bind(&review.menu_item_name)
        .bind(review.ratings.presentation.value())
        .bind(review.ratings.taste.value())
        .bind(review.ratings.portion_size.value())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            classify_with(
                e,
                "Menu item review",
                "No menu item with that name exists at this restaurant",
            )
        })?;

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn delete_menu_item_review(&self, review_number: i64) -> Result<bool, RepositoryError> {
        self.delete_pair("Menu_Item_Review", review_number).await
    }

    async fn find_restaurant_reviews(
        &self,
        filter: &RestaurantReviewFilter,
    ) -> Result<Vec<RestaurantReviewRecord>, RepositoryError> {
        let condition = match filter {
            RestaurantReviewFilter::All => "",
            RestaurantReviewFilter::ByUser(_) => "WHERE R.UserId = ?",
            RestaurantReviewFilter::ByRestaurant(_) => "WHERE RR.BusinessNumber = ?",
        };
        let sql = format!(
            r#"
            SELECT
                RR.ReviewNumber, RR.BusinessNumber, R.UserId,
                RR.AmbienceRating, RR.CleanlinessRating, RR.ServiceRating,
                R.Content
            FROM Restaurant_Review RR
            JOIN Review R ON R.ReviewNumber = RR.ReviewNumber
            {condition}
            ORDER BY RR.ReviewNumber
            "#
        );

        let query = sqlx::query_as::<_, RestaurantReviewRow>(&sql);
        let query = match filter {
            RestaurantReviewFilter::All => query,
            RestaurantReviewFilter::ByUser(user_id) => query.bind(user_id.as_str()),
            RestaurantReviewFilter::ByRestaurant(business_number) => query.bind(*business_number),
        };
        let rows = query.fetch_all(&self.pool).await.map_err(db_error)?;

        Ok(rows.into_iter().map(RestaurantReviewRecord::from).collect())
    }

    async fn find_review_metadata(
        &self,
        filter: &RestaurantReviewFilter,
    ) -> Result<Option<ReviewMetadata>, RepositoryError> {
        match filter {
            RestaurantReviewFilter::All => Ok(None),
            RestaurantReviewFilter::ByUser(user_id) => {
                let row: Option<(String, Option<String>, i64)> = sqlx::query_as(
                    r#"
                    SELECT U.UserId, U.Name, COUNT(RR.ReviewNumber)
                    FROM Review_User U
                    LEFT JOIN Review R ON R.UserId = U.UserId
                    LEFT JOIN Restaurant_Review RR ON RR.ReviewNumber = R.ReviewNumber
                    WHERE U.UserId = ?
                    GROUP BY U.UserId, U.Name
                    "#,
                )
                .bind(user_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

                Ok(row.map(|(user_id, name, review_count)| ReviewMetadata::User {
                    user_id,
                    name,
                    review_count,
                }))
            }
            RestaurantReviewFilter::ByRestaurant(business_number) => {
                let row: Option<(i64, Option<String>, i64)> = sqlx::query_as(
                    r#"
                    SELECT Re.BusinessNumber, Re.Name, COUNT(RR.ReviewNumber)
                    FROM Restaurant Re
                    LEFT JOIN Restaurant_Review RR ON RR.BusinessNumber = Re.BusinessNumber
                    WHERE Re.BusinessNumber = ?
                    GROUP BY Re.BusinessNumber, Re.Name
                    "#,
                )
                .bind(*business_number)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

                Ok(row.map(|(business_number, name, review_count)| ReviewMetadata::Restaurant {
                    business_number,
                    name,
                    review_count,
                }))
            }
        }
    }

    async fn insert_restaurant_review(
        &self,
        review: &NewRestaurantReview,
    ) -> Result<(), RepositoryError> {
        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;

        sqlx::query("INSERT INTO Review (ReviewNumber, Content, UserId) VALUES (?, ?, ?)")
            .bind(review.review_number)
            .bind(&review.content)
            .bind(review.user_id.as_ref().map(|u| u.as_str()))
            .execute(&mut *tx)
            .await
            .map_err(|e| classify_with(e, "Review", "Review author does not exist"))?;

        sqlx::query(
            r#"
            INSERT INTO Restaurant_Review
                (ReviewNumber, BusinessNumber, AmbienceRating, CleanlinessRating, ServiceRating)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.review_number)
        .bind(review.business_number)
        .bind(review.ratings.ambience.value())
        .bind(review.ratings.cleanliness.value())
        .bind(review.ratings.service.value())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            classify_with(
                e,
                "Restaurant review",
                "Could not find restaurant with given business number!",
            )
        })?;

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn update_restaurant_review(
        &self,
        update: &RestaurantReviewUpdate,
    ) -> Result<bool, RepositoryError> {
        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;

        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM Restaurant_Review WHERE ReviewNumber = ?")
                .bind(update.review_number)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error)?;
        if existing.is_none() {
            tx.rollback().await.map_err(db_error)?;
            return Ok(false);
        }

        if update.touches_ratings() {
            sqlx::query(
                r#"
                UPDATE Restaurant_Review SET
                    AmbienceRating = COALESCE(?, AmbienceRating),
                    CleanlinessRating = COALESCE(?, CleanlinessRating),
                    ServiceRating = COALESCE(?, ServiceRating)
                WHERE ReviewNumber = ?
                "#,
            )
            .bind(update.ambience.map(|r| r.value()))
            .bind(update.cleanliness.map(|r| r.value()))
            .bind(update.service.map(|r| r.value()))
            .bind(update.review_number)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        if let Some(content) = &update.content {
            sqlx::query("UPDATE Review SET Content = ? WHERE ReviewNumber = ?")
                .bind(content)
                .bind(update.review_number)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        Ok(true)
    }

    async fn delete_restaurant_review(
        &self,
        review_number: i64,
    ) -> Result<bool, RepositoryError> {
        self.delete_pair("Restaurant_Review", review_number).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::database::seeded_test_pool;
    use super::*;
    use crate::domain::{MenuItemRatings, Rating, RestaurantRatings, UserId};

    fn restaurant_review(review_number: i64, business_number: i64, user: Option<&str>) -> NewRestaurantReview {
        NewRestaurantReview {
            review_number,
            business_number,
            user_id: user.map(|u| UserId::new(u).unwrap()),
            ratings: RestaurantRatings::new(4, 4, 5).unwrap(),
            content: "cozy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_restaurant_reviews_computes_overall() {
        let repo = SqliteReviewRepository::new(seeded_test_pool().await);

        let all = repo.find_restaurant_reviews(&RestaurantReviewFilter::All).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].review_number, 6);
        assert_eq!(all[0].overall_rating, Some(3));
        assert_eq!(all[0].content.as_deref(), Some("the service was okay"));

        let at_point = repo
            .find_restaurant_reviews(&RestaurantReviewFilter::ByRestaurant(234))
            .await
            .unwrap();
        let numbers: Vec<i64> = at_point.iter().map(|r| r.review_number).collect();
        assert_eq!(numbers, vec![7, 9]);
    }

    #[tokio::test]
    async fn test_metadata_for_user_and_restaurant() {
        let repo = SqliteReviewRepository::new(seeded_test_pool().await);

        let user = repo
            .find_review_metadata(&RestaurantReviewFilter::ByUser(UserId::new("user1").unwrap()))
            .await
            .unwrap();
        assert_eq!(
            user,
            Some(ReviewMetadata::User {
                user_id: "user1".to_string(),
                name: Some("John".to_string()),
                review_count: 1,
            })
        );

        // 存在但没有餐厅评论
        let orchard = repo
            .find_review_metadata(&RestaurantReviewFilter::ByRestaurant(345))
            .await
            .unwrap();
        assert!(matches!(
            orchard,
            Some(ReviewMetadata::Restaurant { review_count: 0, .. })
        ));

        let missing = repo
            .find_review_metadata(&RestaurantReviewFilter::ByUser(UserId::new("ghost").unwrap()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_insert_restaurant_review_pair() {
        let repo = SqliteReviewRepository::new(seeded_test_pool().await);

        repo.insert_restaurant_review(&restaurant_review(11, 345, Some("user2")))
            .await
            .unwrap();
        let rows = repo
            .find_restaurant_reviews(&RestaurantReviewFilter::ByRestaurant(345))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].overall_rating, Some(4));

        let err = repo
            .insert_restaurant_review(&restaurant_review(11, 345, None))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_failed_detail_insert_rolls_back_review() {
        let repo = SqliteReviewRepository::new(seeded_test_pool().await);

        let err = repo
            .insert_restaurant_review(&restaurant_review(12, 1, None))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKey(_)));
        assert!(!repo.review_exists(12).await.unwrap());

        let err = repo
            .insert_menu_item_review(&NewMenuItemReview {
                review_number: 13,
                business_number: 123,
                menu_item_name: "Calzone".to_string(),
                ratings: MenuItemRatings::new(3, 3, 3).unwrap(),
                content: String::new(),
                user_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKey(_)));
        assert!(!repo.review_exists(13).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_restaurant_review() {
        let repo = SqliteReviewRepository::new(seeded_test_pool().await);

        let updated = repo
            .update_restaurant_review(&RestaurantReviewUpdate {
                review_number: 8,
                ambience: Some(Rating::new(4).unwrap()),
                cleanliness: None,
                service: Some(Rating::new(4).unwrap()),
                content: Some("better now".to_string()),
            })
            .await
            .unwrap();
        assert!(updated);

        let row = repo
            .find_restaurant_reviews(&RestaurantReviewFilter::ByRestaurant(456))
            .await
            .unwrap()
            .remove(0);
        assert_eq!(row.ambience_rating, Some(4));
        assert_eq!(row.cleanliness_rating, Some(1));
        assert_eq!(row.overall_rating, Some(3));
        assert_eq!(row.content.as_deref(), Some("better now"));

        // 菜品评论不能通过餐厅评论接口修改
        let updated = repo
            .update_restaurant_review(&RestaurantReviewUpdate {
                review_number: 1,
                ambience: None,
                cleanliness: None,
                service: None,
                content: Some("x".to_string()),
            })
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_delete_only_matching_review_kind() {
        let repo = SqliteReviewRepository::new(seeded_test_pool().await);

        // 6 是餐厅评论
        assert!(!repo.delete_menu_item_review(6).await.unwrap());
        assert!(repo.review_exists(6).await.unwrap());

        assert!(repo.delete_restaurant_review(6).await.unwrap());
        assert!(!repo.review_exists(6).await.unwrap());

        assert!(repo.delete_menu_item_review(1).await.unwrap());
        assert_eq!(repo.find_menu_item_reviews().await.unwrap().len(), 4);
    }
}
