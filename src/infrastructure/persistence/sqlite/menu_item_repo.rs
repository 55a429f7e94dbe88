//! SQLite Menu Item Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::errors::{classify, db_error};
use super::{begin_write, DbPool};
use crate::application::ports::{
    MenuItemRecord, MenuItemRepositoryPort, NewMenuItem, RepositoryError, RestaurantSummary,
};
use crate::domain::Cost;

/// SQLite Menu Item Repository
pub struct SqliteMenuItemRepository {
    pool: DbPool,
}

impl SqliteMenuItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 每个类型中价格等于该类型 MIN/MAX 的菜品
    async fn find_extreme_by_type(&self, aggregate: &str) -> Result<Vec<MenuItemRecord>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT M.BusinessNumber, M.Name, M.Type, M.Cost
            FROM Menu_Item M
            JOIN (
                SELECT Type, {aggregate}(Cost) AS Extreme
                FROM Menu_Item
                GROUP BY Type
            ) E ON E.Type = M.Type AND E.Extreme = M.Cost
            ORDER BY M.Type, M.BusinessNumber, M.Name
            "#
        );

        let rows: Vec<MenuItemRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(MenuItemRecord::from).collect())
    }
}

#[derive(FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct MenuItemRow {
    business_number: i64,
    name: String,
    #[sqlx(rename = "Type")]
    item_type: String,
    cost: Option<f64>,
}

impl From<MenuItemRow> for MenuItemRecord {
    fn from(row: MenuItemRow) -> Self {
        MenuItemRecord {
            business_number: row.business_number,
            name: row.name,
            item_type: row.item_type,
            cost: row.cost,
        }
    }
}

#[derive(FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct RestaurantSummaryRow {
    business_number: i64,
    name: Option<String>,
}

#[async_trait]
impl MenuItemRepositoryPort for SqliteMenuItemRepository {
    async fn find_all(&self) -> Result<Vec<MenuItemRecord>, RepositoryError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            "SELECT BusinessNumber, Name, Type, Cost FROM Menu_Item ORDER BY BusinessNumber, Name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(MenuItemRecord::from).collect())
    }

    async fn find_types(&self) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT Type FROM Menu_Item_Type ORDER BY Type")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(|(t,)| t).collect())
    }

    async fn insert(&self, item: &NewMenuItem) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO Menu_Item (BusinessNumber, Name, Type, Cost) VALUES (?, ?, ?, ?)")
            .bind(item.business_number)
            .bind(&item.name)
            .bind(&item.item_type)
            .bind(item.cost.value())
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, "Menu item"))?;

        Ok(())
    }

    async fn delete(&self, business_number: i64, name: &str) -> Result<bool, RepositoryError> {
        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;

        // Menu_Item_Review 行会随菜品级联删除，Review 行需要先删
        sqlx::query(
            r#"
            DELETE FROM Review WHERE ReviewNumber IN (
                SELECT ReviewNumber FROM Menu_Item_Review
                WHERE BusinessNumber = ? AND MenuItemName = ?
            )
            "#,
        )
        .bind(business_number)
        .bind(name)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        let result = sqlx::query("DELETE FROM Menu_Item WHERE BusinessNumber = ? AND Name = ?")
            .bind(business_number)
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(db_error)?;
            return Ok(false);
        }

        tx.commit().await.map_err(db_error)?;
        Ok(true)
    }

    async fn update_cost(
        &self,
        business_number: i64,
        name: &str,
        cost: Cost,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE Menu_Item SET Cost = ? WHERE BusinessNumber = ? AND Name = ?")
            .bind(cost.value())
            .bind(business_number)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_cheapest_by_type(&self) -> Result<Vec<MenuItemRecord>, RepositoryError> {
        self.find_extreme_by_type("MIN").await
    }

    async fn find_most_expensive_by_type(&self) -> Result<Vec<MenuItemRecord>, RepositoryError> {
        self.find_extreme_by_type("MAX").await
    }

    async fn find_restaurants_offering_all(
        &self,
        types: &[String],
    ) -> Result<Vec<RestaurantSummary>, RepositoryError> {
        // 不存在这样的类型：在集合中，但该餐厅没有此类型的菜品
        let type_filter = if types.is_empty() {
            String::new()
        } else {
            let placeholders = vec!["?"; types.len()].join(", ");
            format!("AND T.Type IN ({})", placeholders)
        };
        let sql = format!(
            r#"
            SELECT R.BusinessNumber, R.Name
            FROM Restaurant R
            WHERE NOT EXISTS (
                SELECT 1 FROM Menu_Item_Type T
                WHERE 1 = 1 {type_filter}
                  AND NOT EXISTS (
                    SELECT 1 FROM Menu_Item M
                    WHERE M.BusinessNumber = R.BusinessNumber AND M.Type = T.Type
                  )
            )
            ORDER BY R.BusinessNumber
            "#
        );

        let mut query = sqlx::query_as::<_, RestaurantSummaryRow>(&sql);
        for item_type in types {
            query = query.bind(item_type);
        }
        let rows = query.fetch_all(&self.pool).await.map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| RestaurantSummary {
                business_number: row.business_number,
                name: row.name,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::database::seeded_test_pool;
    use super::*;

    fn item(business_number: i64, name: &str, item_type: &str, cost: f64) -> NewMenuItem {
        NewMenuItem {
            business_number,
            name: name.to_string(),
            item_type: item_type.to_string(),
            cost: Cost::new(cost).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_duplicate() {
        let repo = SqliteMenuItemRepository::new(seeded_test_pool().await);

        repo.insert(&item(123, "Hawaiian Pizza", "Pizza", 17.5)).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap().len(), 8);

        let err = repo.insert(&item(123, "Hawaiian Pizza", "Pizza", 1.0)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_insert_unknown_type_or_restaurant() {
        let repo = SqliteMenuItemRepository::new(seeded_test_pool().await);

        let err = repo.insert(&item(123, "Taco", "Tacos", 3.0)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKey(_)));

        let err = repo.insert(&item(1, "Taco", "Pizza", 3.0)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKey(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_item_reviews() {
        let pool = seeded_test_pool().await;
        let repo = SqliteMenuItemRepository::new(pool.clone());

        assert!(repo.delete(234, "Cheeseburger").await.unwrap());
        let (reviews,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Review WHERE ReviewNumber = 2")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(reviews, 0);

        assert!(!repo.delete(234, "Cheeseburger").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_cost() {
        let repo = SqliteMenuItemRepository::new(seeded_test_pool().await);

        assert!(repo.update_cost(123, "Pepperoni Pizza", Cost::new(12.0).unwrap()).await.unwrap());
        assert!(!repo.update_cost(123, "Nothing", Cost::new(12.0).unwrap()).await.unwrap());

        let pizza = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .find(|m| m.name == "Pepperoni Pizza")
            .unwrap();
        assert_eq!(pizza.cost, Some(12.0));
    }

    #[tokio::test]
    async fn test_cheapest_and_most_expensive_by_type() {
        let repo = SqliteMenuItemRepository::new(seeded_test_pool().await);

        let cheapest: Vec<(String, String)> = repo
            .find_cheapest_by_type()
            .await
            .unwrap()
            .into_iter()
            .map(|m| (m.item_type, m.name))
            .collect();
        assert_eq!(
            cheapest,
            vec![
                ("Burgers".to_string(), "Cheeseburger".to_string()),
                ("Dim Sum".to_string(), "Shrimp wrappers".to_string()),
                ("Pasta".to_string(), "Lasagna".to_string()),
                ("Pizza".to_string(), "Pepperoni Pizza".to_string()),
                ("Sushi".to_string(), "California Roll".to_string()),
            ]
        );

        let priciest = repo.find_most_expensive_by_type().await.unwrap();
        let pasta = priciest.iter().find(|m| m.item_type == "Pasta").unwrap();
        assert_eq!(pasta.name, "Premium Spaghetti");
    }

    #[tokio::test]
    async fn test_ties_are_all_returned() {
        let repo = SqliteMenuItemRepository::new(seeded_test_pool().await);
        repo.insert(&item(909, "Budget Lasagna", "Pasta", 25.0)).await.unwrap();

        let pasta: Vec<_> = repo
            .find_cheapest_by_type()
            .await
            .unwrap()
            .into_iter()
            .filter(|m| m.item_type == "Pasta")
            .collect();
        assert_eq!(pasta.len(), 2);
    }

    #[tokio::test]
    async fn test_restaurants_offering_all_types() {
        let repo = SqliteMenuItemRepository::new(seeded_test_pool().await);

        let burgers_and_pasta = repo
            .find_restaurants_offering_all(&["Burgers".to_string(), "Pasta".to_string()])
            .await
            .unwrap();
        assert_eq!(
            burgers_and_pasta,
            vec![RestaurantSummary {
                business_number: 234,
                name: Some("The Point".to_string()),
            }]
        );

        let dim_sum: Vec<i64> = repo
            .find_restaurants_offering_all(&["Dim Sum".to_string()])
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.business_number)
            .collect();
        assert_eq!(dim_sum, vec![345, 999]);

        // 没有餐厅覆盖全部五个类型
        assert!(repo.find_restaurants_offering_all(&[]).await.unwrap().is_empty());
    }
}
