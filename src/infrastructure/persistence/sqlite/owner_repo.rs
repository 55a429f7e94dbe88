//! SQLite Owner / City Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::errors::{classify, db_error};
use super::DbPool;
use crate::application::ports::{
    CityRecord, CityRepositoryPort, OwnerRecord, OwnerRepositoryPort, RepositoryError,
};
use crate::domain::CityRef;

/// SQLite Owner Repository
pub struct SqliteOwnerRepository {
    pool: DbPool,
}

impl SqliteOwnerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct OwnerRow {
    #[sqlx(rename = "SIN")]
    sin: i64,
    #[sqlx(rename = "Name")]
    name: Option<String>,
}

impl From<OwnerRow> for OwnerRecord {
    fn from(row: OwnerRow) -> Self {
        OwnerRecord {
            sin: row.sin,
            name: row.name,
        }
    }
}

#[async_trait]
impl OwnerRepositoryPort for SqliteOwnerRepository {
    async fn find_all(&self) -> Result<Vec<OwnerRecord>, RepositoryError> {
        let rows: Vec<OwnerRow> = sqlx::query_as("SELECT SIN, Name FROM Owner ORDER BY SIN")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(OwnerRecord::from).collect())
    }

    async fn insert(&self, owner: &OwnerRecord) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO Owner (SIN, Name) VALUES (?, ?)")
            .bind(owner.sin)
            .bind(&owner.name)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, "Owner with that SIN"))?;

        Ok(())
    }

    async fn delete(&self, sin: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM Owner WHERE SIN = ?")
            .bind(sin)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected())
    }
}

/// SQLite City Repository
pub struct SqliteCityRepository {
    pool: DbPool,
}

impl SqliteCityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct CityRow {
    name: String,
    #[sqlx(rename = "Province_State")]
    province_state: String,
    country: Option<String>,
}

#[async_trait]
impl CityRepositoryPort for SqliteCityRepository {
    async fn find_all(&self) -> Result<Vec<CityRecord>, RepositoryError> {
        let rows: Vec<CityRow> =
            sqlx::query_as("SELECT Name, Province_State, Country FROM City ORDER BY Name")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| CityRecord {
                name: row.name,
                province_state: row.province_state,
                country: row.country,
            })
            .collect())
    }

    async fn exists(&self, city: &CityRef) -> Result<bool, RepositoryError> {
        let found: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM City WHERE Name = ? AND Province_State = ?")
                .bind(city.name())
                .bind(city.province_state())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::super::database::seeded_test_pool;
    use super::*;

    #[tokio::test]
    async fn test_owner_insert_duplicate_and_delete() {
        let repo = SqliteOwnerRepository::new(seeded_test_pool().await);

        repo.insert(&OwnerRecord {
            sin: 111222333,
            name: Some("Ada".to_string()),
        })
        .await
        .unwrap();
        let err = repo
            .insert(&OwnerRecord {
                sin: 111222333,
                name: Some("Ada".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));

        assert_eq!(repo.find_all().await.unwrap().len(), 6);
        assert_eq!(repo.delete(111222333).await.unwrap(), 1);
        assert_eq!(repo.delete(111222333).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deleting_owner_clears_restaurant_owner() {
        let pool = seeded_test_pool().await;
        let repo = SqliteOwnerRepository::new(pool.clone());

        assert_eq!(repo.delete(987654321).await.unwrap(), 1);
        let (orphans,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM Restaurant WHERE OwnerId IS NULL")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(orphans, 2);
    }

    #[tokio::test]
    async fn test_city_exists() {
        let repo = SqliteCityRepository::new(seeded_test_pool().await);
        assert!(repo
            .exists(&CityRef::new("Vancouver", "British Columbia").unwrap())
            .await
            .unwrap());
        assert!(!repo
            .exists(&CityRef::new("Vancouver", "Ontario").unwrap())
            .await
            .unwrap());
        assert_eq!(repo.find_all().await.unwrap().len(), 5);
    }
}
