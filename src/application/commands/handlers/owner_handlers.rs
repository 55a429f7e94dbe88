//! Owner Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateOwner, DeleteOwner};
use crate::application::error::ApplicationError;
use crate::application::ports::{OwnerRecord, OwnerRepositoryPort};

const MAX_OWNER_NAME_LEN: usize = 30;

/// CreateOwner Handler
pub struct CreateOwnerHandler {
    owner_repo: Arc<dyn OwnerRepositoryPort>,
}

impl CreateOwnerHandler {
    pub fn new(owner_repo: Arc<dyn OwnerRepositoryPort>) -> Self {
        Self { owner_repo }
    }

    pub async fn handle(&self, command: CreateOwner) -> Result<(), ApplicationError> {
        if command.sin <= 0 {
            return Err(ApplicationError::validation("SIN must be a positive number"));
        }
        let name = command.name.trim();
        if name.is_empty() || name.chars().count() > MAX_OWNER_NAME_LEN {
            return Err(ApplicationError::validation(
                "Owner name must be between 1 and 30 characters",
            ));
        }

        self.owner_repo
            .insert(&OwnerRecord {
                sin: command.sin,
                name: Some(name.to_string()),
            })
            .await?;

        tracing::info!(sin = command.sin, "Owner created");
        Ok(())
    }
}

/// DeleteOwner Handler
pub struct DeleteOwnerHandler {
    owner_repo: Arc<dyn OwnerRepositoryPort>,
}

impl DeleteOwnerHandler {
    pub fn new(owner_repo: Arc<dyn OwnerRepositoryPort>) -> Self {
        Self { owner_repo }
    }

    pub async fn handle(&self, command: DeleteOwner) -> Result<(), ApplicationError> {
        let deleted = self.owner_repo.delete(command.sin).await?;
        if deleted == 0 {
            return Err(ApplicationError::not_found("Owner does not exist!"));
        }

        tracing::info!(sin = command.sin, "Owner deleted");
        Ok(())
    }
}
