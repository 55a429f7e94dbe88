//! SQLite Restaurant Repository
//!
//! 餐厅写入在一个事务内完成全部检查与写入：
//! 邮编 → 城市（必须属于邮编所在省份）→ 地址未被占用 → 业主存在

use async_trait::async_trait;
use sqlx::{FromRow, SqliteConnection};

use super::errors::{classify, db_error};
use super::{begin_write, DbPool};
use crate::application::ports::{
    NewRestaurant, RepositoryError, RestaurantListing, RestaurantRejection,
    RestaurantRepositoryPort, RestaurantUpdate, RestaurantWriteError,
};

type WriteResult<T> = Result<T, RestaurantWriteError>;

fn rejected<T>(rejection: RestaurantRejection) -> WriteResult<T> {
    Err(RestaurantWriteError::Rejected(rejection))
}

/// 门牌号、街道、邮编组成的地址主键
#[derive(Debug, Clone, PartialEq, Eq)]
struct AddressKey {
    house_number: i64,
    street_name: String,
    postal_code: String,
}

/// SQLite Restaurant Repository
pub struct SqliteRestaurantRepository {
    pool: DbPool,
}

impl SqliteRestaurantRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct ListingRow {
    business_number: i64,
    name: Option<String>,
    owner_id: Option<i64>,
    owner: Option<String>,
    address: Option<String>,
    city: Option<String>,
}

impl From<ListingRow> for RestaurantListing {
    fn from(row: ListingRow) -> Self {
        RestaurantListing {
            business_number: row.business_number,
            name: row.name,
            owner_id: row.owner_id,
            owner: row.owner,
            address: row.address,
            city: row.city,
        }
    }
}

/// 修改前的餐厅状态
#[derive(FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct CurrentRow {
    house_number: Option<i64>,
    street_name: Option<String>,
    postal_code: Option<String>,
    city_name: Option<String>,
}

impl CurrentRow {
    fn address(&self) -> Option<AddressKey> {
        Some(AddressKey {
            house_number: self.house_number?,
            street_name: self.street_name.clone()?,
            postal_code: self.postal_code.clone()?,
        })
    }
}

// ============================================================================
// 事务内的检查
// ============================================================================

/// 邮编所在省份；邮编不存在时为 None
async fn postal_province(conn: &mut SqliteConnection, postal_code: &str) -> WriteResult<Option<String>> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT Province_State FROM Postal_Area WHERE PostalCode = ?")
            .bind(postal_code)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error)?;

    Ok(row.map(|(province,)| province.unwrap_or_default()))
}

async fn city_exists(conn: &mut SqliteConnection, name: &str, province: &str) -> WriteResult<bool> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT 1 FROM City WHERE Name = ? AND Province_State = ?")
            .bind(name)
            .bind(province)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error)?;

    Ok(row.is_some())
}

async fn address_exists(conn: &mut SqliteConnection, address: &AddressKey) -> WriteResult<bool> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT 1 FROM Address WHERE HouseNumber = ? AND StreetName = ? AND PostalCode = ?",
    )
    .bind(address.house_number)
    .bind(&address.street_name)
    .bind(&address.postal_code)
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_error)?;

    Ok(row.is_some())
}

async fn owner_exists(conn: &mut SqliteConnection, sin: i64) -> WriteResult<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM Owner WHERE SIN = ?")
        .bind(sin)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error)?;

    Ok(row.is_some())
}

/// 城市必须存在于邮编所在的省份
async fn check_city_in_postal_area(
    conn: &mut SqliteConnection,
    postal_code: &str,
    city_name: &str,
) -> WriteResult<()> {
    let Some(province) = postal_province(conn, postal_code).await? else {
        return rejected(RestaurantRejection::PostalAreaMissing);
    };
    if !city_exists(conn, city_name, &province).await? {
        return rejected(RestaurantRejection::CityMissing);
    }
    Ok(())
}

async fn insert_address(
    conn: &mut SqliteConnection,
    address: &AddressKey,
    city_name: &str,
) -> WriteResult<()> {
    sqlx::query(
        "INSERT INTO Address (HouseNumber, StreetName, PostalCode, CityName) VALUES (?, ?, ?, ?)",
    )
    .bind(address.house_number)
    .bind(&address.street_name)
    .bind(&address.postal_code)
    .bind(city_name)
    .execute(&mut *conn)
    .await
    .map_err(|e| classify(e, "Address"))?;

    Ok(())
}

/// 没有餐厅再引用时删除地址
async fn delete_address_if_orphaned(
    conn: &mut SqliteConnection,
    address: &AddressKey,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r#"
        DELETE FROM Address
        WHERE HouseNumber = ? AND StreetName = ? AND PostalCode = ?
          AND NOT EXISTS (
            SELECT 1 FROM Restaurant R
            WHERE R.HouseNumber = Address.HouseNumber
              AND R.StreetName = Address.StreetName
              AND R.PostalCode = Address.PostalCode
          )
        "#,
    )
    .bind(address.house_number)
    .bind(&address.street_name)
    .bind(&address.postal_code)
    .execute(&mut *conn)
    .await
    .map_err(db_error)?;

    Ok(result.rows_affected())
}

#[async_trait]
impl RestaurantRepositoryPort for SqliteRestaurantRepository {
    async fn find_all(&self) -> Result<Vec<RestaurantListing>, RepositoryError> {
        let rows: Vec<ListingRow> = sqlx::query_as(
            r#"
            SELECT
                R.BusinessNumber,
                R.Name,
                R.OwnerId,
                O.Name AS Owner,
                R.HouseNumber || ' ' || R.StreetName || ' ' || R.PostalCode AS Address,
                A.CityName AS City
            FROM Restaurant R
            LEFT JOIN Owner O ON O.SIN = R.OwnerId
            LEFT JOIN Address A
                ON A.HouseNumber = R.HouseNumber
               AND A.StreetName = R.StreetName
               AND A.PostalCode = R.PostalCode
            ORDER BY R.BusinessNumber
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(RestaurantListing::from).collect())
    }

    async fn insert(&self, restaurant: &NewRestaurant) -> Result<(), RestaurantWriteError> {
        let address = AddressKey {
            house_number: restaurant.address.house_number(),
            street_name: restaurant.address.street_name().to_string(),
            postal_code: restaurant.address.postal_code().as_str().to_string(),
        };

        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;

        check_city_in_postal_area(&mut tx, &address.postal_code, &restaurant.city_name).await?;
        if address_exists(&mut tx, &address).await? {
            return rejected(RestaurantRejection::AddressTaken);
        }
        if !owner_exists(&mut tx, restaurant.owner_id).await? {
            return rejected(RestaurantRejection::OwnerMissing);
        }

        insert_address(&mut tx, &address, &restaurant.city_name).await?;
        sqlx::query(
            r#"
            INSERT INTO Restaurant (BusinessNumber, HouseNumber, StreetName, PostalCode, Name, OwnerId)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(restaurant.business_number)
        .bind(address.house_number)
        .bind(&address.street_name)
        .bind(&address.postal_code)
        .bind(&restaurant.name)
        .bind(restaurant.owner_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| classify(e, "Restaurant with that business number"))?;

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn update(&self, update: &RestaurantUpdate) -> Result<(), RestaurantWriteError> {
        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;

        let current: Option<CurrentRow> = sqlx::query_as(
            r#"
            SELECT R.HouseNumber, R.StreetName, R.PostalCode, A.CityName
            FROM Restaurant R
            LEFT JOIN Address A
                ON A.HouseNumber = R.HouseNumber
               AND A.StreetName = R.StreetName
               AND A.PostalCode = R.PostalCode
            WHERE R.BusinessNumber = ?
            "#,
        )
        .bind(update.business_number)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;
        let Some(current) = current else {
            return rejected(RestaurantRejection::RestaurantMissing);
        };

        let old_address = current.address();
        let postal_changed = update.postal_code.is_some();
        let city_changed = update.city_name.is_some();

        // 地址或城市有变化时，需要得到完整的新地址
        let mut new_address = old_address.clone();
        if update.touches_address() || city_changed {
            let house_number = update.house_number.or(current.house_number);
            let street_name = update.street_name.clone().or(current.street_name.clone());
            let postal_code = update
                .postal_code
                .as_ref()
                .map(|p| p.as_str().to_string())
                .or(current.postal_code.clone());
            match (house_number, street_name, postal_code) {
                (Some(house_number), Some(street_name), Some(postal_code)) => {
                    new_address = Some(AddressKey {
                        house_number,
                        street_name,
                        postal_code,
                    });
                }
                _ => return rejected(RestaurantRejection::AddressIncomplete),
            }
        }
        let address_changed = new_address != old_address;
        let city_name = update.city_name.clone().or(current.city_name.clone());

        if let Some(address) = &new_address {
            if postal_changed || city_changed {
                let Some(city) = city_name.as_deref() else {
                    return rejected(RestaurantRejection::AddressIncomplete);
                };
                check_city_in_postal_area(&mut tx, &address.postal_code, city).await?;
            }
            if address_changed && address_exists(&mut tx, address).await? {
                return rejected(RestaurantRejection::AddressTaken);
            }
        }
        if let Some(owner_id) = update.owner_id {
            if !owner_exists(&mut tx, owner_id).await? {
                return rejected(RestaurantRejection::OwnerMissing);
            }
        }

        if let Some(address) = new_address.as_ref().filter(|_| address_changed) {
            let Some(city) = city_name.as_deref() else {
                return rejected(RestaurantRejection::AddressIncomplete);
            };
            insert_address(&mut tx, address, city).await?;
        } else if let (Some(address), Some(city)) = (&new_address, update.city_name.as_deref()) {
            sqlx::query(
                "UPDATE Address SET CityName = ? WHERE HouseNumber = ? AND StreetName = ? AND PostalCode = ?",
            )
            .bind(city)
            .bind(address.house_number)
            .bind(&address.street_name)
            .bind(&address.postal_code)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        sqlx::query(
            r#"
            UPDATE Restaurant SET
                Name = COALESCE(?, Name),
                OwnerId = COALESCE(?, OwnerId),
                HouseNumber = ?,
                StreetName = ?,
                PostalCode = ?
            WHERE BusinessNumber = ?
            "#,
        )
        .bind(update.name.as_deref())
        .bind(update.owner_id)
        .bind(new_address.as_ref().map(|a| a.house_number))
        .bind(new_address.as_ref().map(|a| a.street_name.as_str()))
        .bind(new_address.as_ref().map(|a| a.postal_code.as_str()))
        .bind(update.business_number)
        .execute(&mut *tx)
        .await
        .map_err(|e| classify(e, "Restaurant"))?;

        if address_changed {
            if let Some(old) = &old_address {
                delete_address_if_orphaned(&mut tx, old).await?;
            }
        }

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn delete(&self, business_number: i64) -> Result<bool, RepositoryError> {
        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;

        let current: Option<CurrentRow> = sqlx::query_as(
            r#"
            SELECT HouseNumber, StreetName, PostalCode, NULL AS CityName
            FROM Restaurant WHERE BusinessNumber = ?
            "#,
        )
        .bind(business_number)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;
        let Some(current) = current else {
            return Ok(false);
        };

        // 明细行随 Restaurant 级联删除，Review 行需要单独删除
        sqlx::query(
            r#"
            DELETE FROM Review WHERE ReviewNumber IN (
                SELECT ReviewNumber FROM Restaurant_Review WHERE BusinessNumber = ?
                UNION
                SELECT ReviewNumber FROM Menu_Item_Review WHERE BusinessNumber = ?
            )
            "#,
        )
        .bind(business_number)
        .bind(business_number)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        sqlx::query("DELETE FROM Restaurant WHERE BusinessNumber = ?")
            .bind(business_number)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        if let Some(address) = current.address() {
            delete_address_if_orphaned(&mut tx, &address).await?;
        }

        tx.commit().await.map_err(db_error)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::database::{seeded_file_pool, seeded_test_pool};
    use super::*;
    use crate::domain::{PostalCode, StreetAddress};
    use std::sync::Arc;

    async fn count(pool: &DbPool, sql: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(sql).fetch_one(pool).await.unwrap();
        n
    }

    fn new_restaurant(house: i64, street: &str, postal: &str, city: &str, owner: i64) -> NewRestaurant {
        NewRestaurant {
            business_number: 777,
            name: "Noodle Bar".to_string(),
            address: StreetAddress::new(house, street, PostalCode::new(postal).unwrap()).unwrap(),
            city_name: city.to_string(),
            owner_id: owner,
        }
    }

    fn rejection(err: RestaurantWriteError) -> RestaurantRejection {
        match err {
            RestaurantWriteError::Rejected(r) => r,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_find_all_formats_address() {
        let repo = SqliteRestaurantRepository::new(seeded_test_pool().await);
        let restaurants = repo.find_all().await.unwrap();
        assert_eq!(restaurants.len(), 6);

        let pizza = &restaurants[0];
        assert_eq!(pizza.business_number, 123);
        assert_eq!(pizza.owner.as_deref(), Some("Bob"));
        assert_eq!(pizza.address.as_deref(), Some("601 W Hastings Street V6B 1M8"));
        assert_eq!(pizza.city.as_deref(), Some("Vancouver"));
    }

    #[tokio::test]
    async fn test_insert_creates_address_and_restaurant() {
        let pool = seeded_test_pool().await;
        let repo = SqliteRestaurantRepository::new(pool.clone());

        repo.insert(&new_restaurant(10, "Main Street", "V6T 1Z4", "Richmond", 123456789))
            .await
            .unwrap();

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM Restaurant").await, 7);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM Address").await, 6);
    }

    #[tokio::test]
    async fn test_insert_at_existing_address_writes_nothing() {
        let pool = seeded_test_pool().await;
        let repo = SqliteRestaurantRepository::new(pool.clone());

        let err = repo
            .insert(&new_restaurant(601, "W Hastings Street", "V6B 1M8", "Vancouver", 123456789))
            .await
            .unwrap_err();
        assert_eq!(rejection(err), RestaurantRejection::AddressTaken);
        assert_eq!(
            RestaurantRejection::AddressTaken.message(),
            "There is already a restaurant with the same address!"
        );

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM Restaurant").await, 6);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM Address").await, 5);
    }

    #[tokio::test]
    async fn test_insert_checks_run_in_order() {
        let repo = SqliteRestaurantRepository::new(seeded_test_pool().await);

        // 邮编与城市都不合法时先报邮编
        let err = repo
            .insert(&new_restaurant(10, "Main Street", "X0X 0X0", "Nowhere", 1))
            .await
            .unwrap_err();
        assert_eq!(rejection(err), RestaurantRejection::PostalAreaMissing);

        // Toronto 不在 British Columbia
        let err = repo
            .insert(&new_restaurant(10, "Main Street", "V6T 1Z4", "Toronto", 1))
            .await
            .unwrap_err();
        assert_eq!(rejection(err), RestaurantRejection::CityMissing);

        let err = repo
            .insert(&new_restaurant(10, "Main Street", "V6T 1Z4", "Vancouver", 1))
            .await
            .unwrap_err();
        assert_eq!(rejection(err), RestaurantRejection::OwnerMissing);
    }

    #[tokio::test]
    async fn test_update_moves_restaurant_and_drops_orphaned_address() {
        let pool = seeded_test_pool().await;
        let repo = SqliteRestaurantRepository::new(pool.clone());

        repo.update(&RestaurantUpdate {
            business_number: 123,
            house_number: Some(700),
            name: Some("Bob's Better Pizza".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM Address WHERE HouseNumber = 601").await,
            0
        );
        assert_eq!(
            count(
                &pool,
                "SELECT COUNT(*) FROM Restaurant WHERE BusinessNumber = 123 AND HouseNumber = 700 AND OwnerId = 123456789"
            )
            .await,
            1
        );
    }

    #[tokio::test]
    async fn test_update_keeps_shared_address() {
        let pool = seeded_test_pool().await;
        let repo = SqliteRestaurantRepository::new(pool.clone());

        // 345 与 456 共用 6363 Agronomy Road
        repo.update(&RestaurantUpdate {
            business_number: 345,
            house_number: Some(6400),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM Address WHERE HouseNumber IN (6363, 6400)").await,
            2
        );
    }

    #[tokio::test]
    async fn test_update_rejections() {
        let repo = SqliteRestaurantRepository::new(seeded_test_pool().await);

        let err = repo
            .update(&RestaurantUpdate {
                business_number: 1,
                name: Some("Ghost".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(rejection(err), RestaurantRejection::RestaurantMissing);

        let err = repo
            .update(&RestaurantUpdate {
                business_number: 234,
                house_number: Some(6363),
                street_name: Some("Agronomy Road".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(rejection(err), RestaurantRejection::AddressTaken);

        let err = repo
            .update(&RestaurantUpdate {
                business_number: 234,
                city_name: Some("Ottawa".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(rejection(err), RestaurantRejection::CityMissing);

        let err = repo
            .update(&RestaurantUpdate {
                business_number: 234,
                owner_id: Some(42),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(rejection(err), RestaurantRejection::OwnerMissing);
    }

    #[tokio::test]
    async fn test_update_city_only_rewrites_address_city() {
        let pool = seeded_test_pool().await;
        let repo = SqliteRestaurantRepository::new(pool.clone());

        repo.update(&RestaurantUpdate {
            business_number: 234,
            city_name: Some("Richmond".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

        let listing = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .find(|r| r.business_number == 234)
            .unwrap();
        assert_eq!(listing.city.as_deref(), Some("Richmond"));
    }

    #[tokio::test]
    async fn test_delete_removes_reviews_and_orphaned_address() {
        let pool = seeded_test_pool().await;
        let repo = SqliteRestaurantRepository::new(pool.clone());

        assert!(repo.delete(234).await.unwrap());

        // 餐厅评论 7、9 与菜品评论 2
        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM Review WHERE ReviewNumber IN (2, 7, 9)").await,
            0
        );
        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM Address WHERE StreetName = 'Lower Mall'").await,
            0
        );
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM Menu_Item WHERE BusinessNumber = 234").await, 0);

        assert!(!repo.delete(234).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_keeps_address_still_in_use() {
        let pool = seeded_test_pool().await;
        let repo = SqliteRestaurantRepository::new(pool.clone());

        assert!(repo.delete(456).await.unwrap());
        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM Address WHERE HouseNumber = 6363").await,
            1
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_all_commit() {
        let dir = tempfile::tempdir().unwrap();
        let pool = seeded_file_pool(&dir.path().join("forkful.db")).await;
        let repo = Arc::new(SqliteRestaurantRepository::new(pool.clone()));

        let tasks: Vec<_> = (0..40)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    let restaurant = NewRestaurant {
                        business_number: 5000 + i,
                        ..new_restaurant(1000 + i, "Main Street", "V6T 1Z4", "Vancouver", 123456789)
                    };
                    repo.insert(&restaurant).await
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM Restaurant").await, 46);
        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM Address WHERE StreetName = 'Main Street'").await,
            40
        );
    }
}
