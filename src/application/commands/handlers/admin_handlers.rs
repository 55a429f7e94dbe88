//! Admin Command Handlers

use std::sync::Arc;

use crate::application::commands::ResetDatabase;
use crate::application::error::ApplicationError;
use crate::application::ports::DatabaseAdminPort;

/// ResetDatabase Handler
pub struct ResetDatabaseHandler {
    admin: Arc<dyn DatabaseAdminPort>,
}

impl ResetDatabaseHandler {
    pub fn new(admin: Arc<dyn DatabaseAdminPort>) -> Self {
        Self { admin }
    }

    pub async fn handle(&self, _command: ResetDatabase) -> Result<(), ApplicationError> {
        self.admin.reset_and_seed().await?;
        tracing::info!("Database reset and demo data seeded");
        Ok(())
    }
}
