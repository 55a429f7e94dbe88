//! Verification Command Handlers
//!
//! 认证编号分配：抽取随机编号，冲突时重新抽取，最多 `max_attempts` 次

use std::sync::Arc;

use serde::Serialize;

use crate::application::commands::{VerifyEligibleUsers, VerifyUser};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    VerificationNumberSource, VerificationRepositoryPort, VerifyAttempt,
};
use crate::domain::{UserId, VerificationNumber};

/// 单个用户的认证结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified(VerificationNumber),
    AlreadyVerified,
}

impl VerifyOutcome {
    pub fn code(&self) -> i32 {
        match self {
            VerifyOutcome::Verified(_) => 1,
            VerifyOutcome::AlreadyVerified => -1,
        }
    }
}

/// VerifyUser Handler
pub struct VerifyUserHandler {
    verification_repo: Arc<dyn VerificationRepositoryPort>,
    numbers: Arc<dyn VerificationNumberSource>,
    max_attempts: u32,
}

impl VerifyUserHandler {
    pub fn new(
        verification_repo: Arc<dyn VerificationRepositoryPort>,
        numbers: Arc<dyn VerificationNumberSource>,
        max_attempts: u32,
    ) -> Self {
        Self {
            verification_repo,
            numbers,
            max_attempts,
        }
    }

    pub async fn handle(&self, command: VerifyUser) -> Result<VerifyOutcome, ApplicationError> {
        let user_id = UserId::new(command.user_id).map_err(ApplicationError::validation)?;
        self.verify(&user_id).await
    }

    async fn verify(&self, user_id: &UserId) -> Result<VerifyOutcome, ApplicationError> {
        for attempt in 1..=self.max_attempts {
            let number = self.numbers.next_number();
            match self.verification_repo.try_verify(user_id, number).await? {
                VerifyAttempt::Inserted => {
                    tracing::info!(
                        user_id = %user_id,
                        verification_number = %number,
                        attempt,
                        "User verified"
                    );
                    return Ok(VerifyOutcome::Verified(number));
                }
                VerifyAttempt::AlreadyVerified => return Ok(VerifyOutcome::AlreadyVerified),
                VerifyAttempt::UserMissing => {
                    return Err(ApplicationError::not_found(
                        "Could not find user with given ID!",
                    ))
                }
                VerifyAttempt::NumberTaken => {
                    tracing::debug!(user_id = %user_id, verification_number = %number, "Verification number taken, drawing again");
                }
            }
        }

        tracing::error!(
            user_id = %user_id,
            max_attempts = self.max_attempts,
            "Verification numbers exhausted"
        );
        Err(ApplicationError::internal(format!(
            "Could not allocate a free verification number after {} attempts",
            self.max_attempts
        )))
    }
}

// ============================================================================
// VerifyEligibleUsers
// ============================================================================

/// 批量认证报告，字段名与前端约定一致
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSweepReport {
    pub successful_users: Vec<String>,
    pub duplicate_users: Vec<String>,
    pub errors: Vec<String>,
}

impl VerificationSweepReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// VerifyEligibleUsers Handler
pub struct VerifyEligibleUsersHandler {
    verification_repo: Arc<dyn VerificationRepositoryPort>,
    verify_user: VerifyUserHandler,
    review_threshold: u32,
}

impl VerifyEligibleUsersHandler {
    pub fn new(
        verification_repo: Arc<dyn VerificationRepositoryPort>,
        numbers: Arc<dyn VerificationNumberSource>,
        max_attempts: u32,
        review_threshold: u32,
    ) -> Self {
        Self {
            verify_user: VerifyUserHandler::new(verification_repo.clone(), numbers, max_attempts),
            verification_repo,
            review_threshold,
        }
    }

    pub async fn handle(
        &self,
        _command: VerifyEligibleUsers,
    ) -> Result<VerificationSweepReport, ApplicationError> {
        let eligible = self
            .verification_repo
            .find_eligible(self.review_threshold)
            .await?;

        let mut report = VerificationSweepReport::default();
        for raw in eligible {
            let outcome = match UserId::new(raw.clone()) {
                Ok(user_id) => self.verify_user.verify(&user_id).await,
                Err(e) => Err(ApplicationError::validation(e)),
            };
            match outcome {
                Ok(VerifyOutcome::Verified(_)) => report.successful_users.push(raw),
                Ok(VerifyOutcome::AlreadyVerified) => report.duplicate_users.push(raw),
                Err(e) => {
                    tracing::warn!(user_id = %raw, error = %e, "Verification failed");
                    report.errors.push(raw);
                }
            }
        }

        tracing::info!(
            threshold = self.review_threshold,
            verified = report.successful_users.len(),
            duplicates = report.duplicate_users.len(),
            errors = report.errors.len(),
            "Verification sweep finished"
        );
        Ok(report)
    }
}
