//! SQLite Follows Repository

use async_trait::async_trait;

use super::errors::{classify, db_error};
use super::DbPool;
use crate::application::ports::{FollowFilter, FollowRecord, FollowsRepositoryPort, RepositoryError};
use crate::domain::UserId;

/// SQLite Follows Repository
pub struct SqliteFollowsRepository {
    pool: DbPool,
}

impl SqliteFollowsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowsRepositoryPort for SqliteFollowsRepository {
    async fn exists(&self, follower: &UserId, followee: &UserId) -> Result<bool, RepositoryError> {
        let found: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM Follows WHERE UserId1 = ? AND UserId2 = ?")
                .bind(follower.as_str())
                .bind(followee.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(found.is_some())
    }

    async fn insert(&self, follower: &UserId, followee: &UserId) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO Follows (UserId1, UserId2) VALUES (?, ?)")
            .bind(follower.as_str())
            .bind(followee.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, "Follow"))?;

        Ok(())
    }

    async fn delete(&self, follower: &UserId, followee: &UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM Follows WHERE UserId1 = ? AND UserId2 = ?")
            .bind(follower.as_str())
            .bind(followee.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected())
    }

    async fn find(&self, filter: &FollowFilter) -> Result<Vec<FollowRecord>, RepositoryError> {
        const SELECT: &str = "SELECT UserId1, UserId2 FROM Follows";

        let rows: Vec<(String, String)> = match filter {
            FollowFilter::All => sqlx::query_as(&format!("{} ORDER BY UserId1, UserId2", SELECT))
                .fetch_all(&self.pool)
                .await,
            FollowFilter::Follower(follower) => {
                sqlx::query_as(&format!("{} WHERE UserId1 = ? ORDER BY UserId2", SELECT))
                    .bind(follower.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            FollowFilter::Followee(followee) => {
                sqlx::query_as(&format!("{} WHERE UserId2 = ? ORDER BY UserId1", SELECT))
                    .bind(followee.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            FollowFilter::Pair {
                follower,
                followee,
                clause,
            } => {
                // clause 只可能是 AND / OR 两个常量
                sqlx::query_as(&format!(
                    "{} WHERE UserId1 = ? {} UserId2 = ? ORDER BY UserId1, UserId2",
                    SELECT,
                    clause.as_sql()
                ))
                .bind(follower.as_str())
                .bind(followee.as_str())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(follower, followee)| FollowRecord { follower, followee })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::database::seeded_test_pool;
    use super::*;
    use crate::domain::FollowClause;

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_duplicate() {
        let repo = SqliteFollowsRepository::new(seeded_test_pool().await);

        assert!(!repo.exists(&uid("user2"), &uid("user1")).await.unwrap());
        repo.insert(&uid("user2"), &uid("user1")).await.unwrap();
        assert!(repo.exists(&uid("user2"), &uid("user1")).await.unwrap());
        assert!(matches!(
            repo.insert(&uid("user2"), &uid("user1")).await.unwrap_err(),
            RepositoryError::Duplicate(_)
        ));
    }

    #[tokio::test]
    async fn test_find_with_filters() {
        let repo = SqliteFollowsRepository::new(seeded_test_pool().await);

        assert_eq!(repo.find(&FollowFilter::All).await.unwrap().len(), 5);
        assert_eq!(
            repo.find(&FollowFilter::Follower(uid("user1"))).await.unwrap().len(),
            2
        );
        assert_eq!(
            repo.find(&FollowFilter::Followee(uid("user2"))).await.unwrap().len(),
            2
        );

        let or = repo
            .find(&FollowFilter::Pair {
                follower: uid("user1"),
                followee: uid("user2"),
                clause: FollowClause::Or,
            })
            .await
            .unwrap();
        // user1→user2, user1→user3, user4→user2
        assert_eq!(or.len(), 3);

        let and = repo
            .find(&FollowFilter::Pair {
                follower: uid("user1"),
                followee: uid("user2"),
                clause: FollowClause::And,
            })
            .await
            .unwrap();
        assert_eq!(
            and,
            vec![FollowRecord {
                follower: "user1".to_string(),
                followee: "user2".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_delete_reports_rows() {
        let repo = SqliteFollowsRepository::new(seeded_test_pool().await);
        assert_eq!(repo.delete(&uid("user5"), &uid("user6")).await.unwrap(), 1);
        assert_eq!(repo.delete(&uid("user5"), &uid("user6")).await.unwrap(), 0);
    }
}
