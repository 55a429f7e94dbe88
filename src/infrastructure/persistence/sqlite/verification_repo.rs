//! SQLite Verification Repository

use async_trait::async_trait;

use super::errors::{classify, db_error};
use super::{begin_write, DbPool};
use crate::application::ports::{
    RepositoryError, VerificationRepositoryPort, VerifiedUserRecord, VerifyAttempt,
};
use crate::domain::{UserId, VerificationNumber};

/// SQLite Verification Repository
pub struct SqliteVerificationRepository {
    pool: DbPool,
}

impl SqliteVerificationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationRepositoryPort for SqliteVerificationRepository {
    async fn find_eligible(&self, review_threshold: u32) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT U.UserId
            FROM Review_User U
            WHERE (SELECT COUNT(*) FROM Review R WHERE R.UserId = U.UserId) > ?
            ORDER BY U.UserId
            "#,
        )
        .bind(i64::from(review_threshold))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(|(user_id,)| user_id).collect())
    }

    async fn find_all(&self) -> Result<Vec<VerifiedUserRecord>, RepositoryError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT UserId, VerificationNumber FROM Verified_User ORDER BY UserId",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(user_id, verification_number)| VerifiedUserRecord {
                user_id,
                verification_number,
            })
            .collect())
    }

    async fn try_verify(
        &self,
        user_id: &UserId,
        number: VerificationNumber,
    ) -> Result<VerifyAttempt, RepositoryError> {
        let mut tx = begin_write(&self.pool).await.map_err(db_error)?;

        let user: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM Review_User WHERE UserId = ?")
            .bind(user_id.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error)?;
        if user.is_none() {
            return Ok(VerifyAttempt::UserMissing);
        }

        let verified: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM Verified_User WHERE UserId = ?")
                .bind(user_id.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error)?;
        if verified.is_some() {
            return Ok(VerifyAttempt::AlreadyVerified);
        }

        let taken: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM Verified_User WHERE VerificationNumber = ?")
                .bind(i64::from(number.value()))
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error)?;
        if taken.is_some() {
            return Ok(VerifyAttempt::NumberTaken);
        }

        let inserted = sqlx::query(
            "INSERT INTO Verified_User (UserId, VerificationNumber) VALUES (?, ?)",
        )
        .bind(user_id.as_str())
        .bind(i64::from(number.value()))
        .execute(&mut *tx)
        .await;

        match inserted.map_err(|e| classify(e, "Verified user")) {
            Ok(_) => {}
            // 并发写入抢先占用；下一轮会重新判断是用户还是编号冲突
            Err(RepositoryError::Duplicate(_)) => return Ok(VerifyAttempt::NumberTaken),
            Err(e) => return Err(e),
        }

        tx.commit().await.map_err(db_error)?;
        Ok(VerifyAttempt::Inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::super::database::{seeded_file_pool, seeded_test_pool};
    use super::*;
    use std::sync::Arc;

    async fn verified_number(pool: &DbPool, user: &str) -> Option<i64> {
        sqlx::query_as::<_, (i64,)>("SELECT VerificationNumber FROM Verified_User WHERE UserId = ?")
            .bind(user)
            .fetch_optional(pool)
            .await
            .unwrap()
            .map(|(n,)| n)
    }

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn number(n: u32) -> VerificationNumber {
        VerificationNumber::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_try_verify_outcomes() {
        let pool = seeded_test_pool().await;
        let repo = SqliteVerificationRepository::new(pool.clone());

        assert_eq!(
            repo.try_verify(&uid("ghost"), number(100)).await.unwrap(),
            VerifyAttempt::UserMissing
        );
        assert_eq!(
            repo.try_verify(&uid("user1"), number(100)).await.unwrap(),
            VerifyAttempt::AlreadyVerified
        );
        assert_eq!(
            repo.try_verify(&uid("user6"), number(3)).await.unwrap(),
            VerifyAttempt::NumberTaken
        );
        assert_eq!(verified_number(&pool, "user6").await, None);

        assert_eq!(
            repo.try_verify(&uid("user6"), number(777)).await.unwrap(),
            VerifyAttempt::Inserted
        );
        assert_eq!(verified_number(&pool, "user6").await, Some(777));
        assert_eq!(repo.find_all().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_eligible_users_need_more_reviews_than_threshold() {
        let repo = SqliteVerificationRepository::new(seeded_test_pool().await);

        // 演示数据中每个用户最多 2 条评论
        assert!(repo.find_eligible(3).await.unwrap().is_empty());
        let eligible = repo.find_eligible(1).await.unwrap();
        assert_eq!(eligible, vec!["user1", "user4", "user5", "user6"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_verification_of_distinct_users() {
        let dir = tempfile::tempdir().unwrap();
        let pool = seeded_file_pool(&dir.path().join("forkful.db")).await;
        for i in 0..20 {
            sqlx::query(
                "INSERT INTO Review_User (UserId, Name, CityName, Province_State) VALUES (?, 'Crowd', 'Vancouver', 'British Columbia')",
            )
            .bind(format!("crowd{i}"))
            .execute(&pool)
            .await
            .unwrap();
        }
        let repo = Arc::new(SqliteVerificationRepository::new(pool.clone()));

        let tasks: Vec<_> = (0..20u32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.try_verify(&uid(&format!("crowd{i}")), number(1000 + i)).await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), VerifyAttempt::Inserted);
        }
        assert_eq!(repo.find_all().await.unwrap().len(), 25);
        assert_eq!(verified_number(&pool, "crowd7").await, Some(1007));
    }
}
