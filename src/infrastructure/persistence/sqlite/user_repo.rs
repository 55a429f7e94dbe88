//! SQLite Review User Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::errors::{classify, db_error};
use super::DbPool;
use crate::application::ports::{
    NewUser, RepositoryError, UserRecord, UserRepositoryPort, UserSummary, UserUpdate,
};
use crate::domain::{CityRef, UserId};

const SEARCH_SELECT: &str = r#"
    SELECT U.UserId, U.Name, U.CityName, U.Province_State, V.VerificationNumber
    FROM Review_User U
    LEFT JOIN Verified_User V ON V.UserId = U.UserId
"#;

/// 搜索词按字面匹配：转义 LIKE 的 `\`、`%`、`_`
fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// SQLite Review User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn search(&self, column: &str, pattern: &str) -> Result<Vec<UserRecord>, RepositoryError> {
        let sql = format!(
            "{} WHERE UPPER(U.{}) LIKE '%' || UPPER(?) || '%' ESCAPE '\\' ORDER BY U.UserId",
            SEARCH_SELECT, column
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(escape_like(pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }
}

#[derive(FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct UserRow {
    user_id: String,
    name: Option<String>,
    city_name: String,
    #[sqlx(rename = "Province_State")]
    province_state: String,
    verification_number: Option<i64>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            user_id: row.user_id,
            name: row.name,
            city_name: row.city_name,
            province_state: row.province_state,
            verification_number: row.verification_number,
        }
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn exists(&self, user_id: &UserId) -> Result<bool, RepositoryError> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM Review_User WHERE UserId = ?")
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(found.is_some())
    }

    async fn insert(&self, user: &NewUser) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO Review_User (UserId, Name, CityName, Province_State) VALUES (?, ?, ?, ?)",
        )
        .bind(user.user_id.as_str())
        .bind(&user.name)
        .bind(user.city.name())
        .bind(user.city.province_state())
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, "User"))?;

        Ok(())
    }

    async fn search_by_id(&self, pattern: &str) -> Result<Vec<UserRecord>, RepositoryError> {
        self.search("UserId", pattern).await
    }

    async fn search_by_name(&self, pattern: &str) -> Result<Vec<UserRecord>, RepositoryError> {
        self.search("Name", pattern).await
    }

    async fn find_by_city(&self, city: &CityRef) -> Result<Vec<UserSummary>, RepositoryError> {
        let rows: Vec<(String, Option<String>)> = sqlx::query_as(
            "SELECT UserId, Name FROM Review_User WHERE CityName = ? AND Province_State = ? ORDER BY UserId",
        )
        .bind(city.name())
        .bind(city.province_state())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(user_id, name)| UserSummary { user_id, name })
            .collect())
    }

    async fn update(&self, update: &UserUpdate) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE Review_User SET
                Name = COALESCE(?, Name),
                CityName = COALESCE(?, CityName),
                Province_State = COALESCE(?, Province_State)
            WHERE UserId = ?
            "#,
        )
        .bind(update.name.as_deref())
        .bind(update.city.as_ref().map(|c| c.name()))
        .bind(update.city.as_ref().map(|c| c.province_state()))
        .bind(update.user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, "User"))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM Review_User WHERE UserId = ?")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::super::database::seeded_test_pool;
    use super::*;

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_insert_duplicate_user_is_rejected() {
        let repo = SqliteUserRepository::new(seeded_test_pool().await);
        let user = NewUser {
            user_id: uid("user1"),
            name: "Someone".to_string(),
            city: CityRef::new("Toronto", "Ontario").unwrap(),
        };

        let err = repo.insert(&user).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));
        assert_eq!(repo.search_by_id("user").await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_insert_with_unknown_city_violates_foreign_key() {
        let repo = SqliteUserRepository::new(seeded_test_pool().await);
        let user = NewUser {
            user_id: uid("user7"),
            name: "Nomad".to_string(),
            city: CityRef::new("Atlantis", "Ontario").unwrap(),
        };
        assert!(matches!(
            repo.insert(&user).await.unwrap_err(),
            RepositoryError::ForeignKey(_)
        ));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_joins_verification() {
        let repo = SqliteUserRepository::new(seeded_test_pool().await);

        let users = repo.search_by_name("kEn").await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_id, "user3");
        assert_eq!(users[0].verification_number, Some(3));

        let users = repo.search_by_id("USER6").await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].verification_number, None);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("user1"), "user1");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let repo = SqliteUserRepository::new(seeded_test_pool().await);
        assert!(repo.search_by_id("_").await.unwrap().is_empty());
        assert!(repo.search_by_name("%").await.unwrap().is_empty());

        repo.insert(&NewUser {
            user_id: uid("night_owl"),
            name: "100% Owl".to_string(),
            city: CityRef::new("Toronto", "Ontario").unwrap(),
        })
        .await
        .unwrap();

        let users = repo.search_by_id("_").await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_id, "night_owl");
        assert_eq!(repo.search_by_name("0% o").await.unwrap().len(), 1);
        assert!(repo.search_by_id("u_er").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_city() {
        let repo = SqliteUserRepository::new(seeded_test_pool().await);
        let users = repo
            .find_by_city(&CityRef::new("Vancouver", "British Columbia").unwrap())
            .await
            .unwrap();
        assert_eq!(users.len(), 4);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let repo = SqliteUserRepository::new(seeded_test_pool().await);
        let updated = repo
            .update(&UserUpdate {
                user_id: uid("user2"),
                name: Some("Janet".to_string()),
                city: None,
            })
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let user = &repo.search_by_id("user2").await.unwrap()[0];
        assert_eq!(user.name.as_deref(), Some("Janet"));
        assert_eq!(user.city_name, "Los Angeles");

        let missing = repo
            .update(&UserUpdate {
                user_id: uid("ghost"),
                name: Some("Boo".to_string()),
                city: None,
            })
            .await
            .unwrap();
        assert_eq!(missing, 0);
    }

    #[tokio::test]
    async fn test_delete_cascades_follows_and_nulls_reviews() {
        let pool = seeded_test_pool().await;
        let repo = SqliteUserRepository::new(pool.clone());

        assert_eq!(repo.delete(&uid("user1")).await.unwrap(), 1);

        let (follows,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM Follows WHERE UserId1 = 'user1' OR UserId2 = 'user1'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(follows, 0);

        let (anonymous,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM Review WHERE ReviewNumber IN (1, 6) AND UserId IS NULL")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(anonymous, 2);

        assert_eq!(repo.delete(&uid("user1")).await.unwrap(), 0);
    }
}
