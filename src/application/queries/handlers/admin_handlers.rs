//! Admin Query Handlers

use std::sync::Arc;

use crate::application::ports::DatabaseAdminPort;
use crate::application::queries::CheckConnection;

/// CheckConnection Handler：连接失败不视为错误，只返回 false
pub struct CheckConnectionHandler {
    admin: Arc<dyn DatabaseAdminPort>,
}

impl CheckConnectionHandler {
    pub fn new(admin: Arc<dyn DatabaseAdminPort>) -> Self {
        Self { admin }
    }

    pub async fn handle(&self, _query: CheckConnection) -> bool {
        match self.admin.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database connection check failed");
                false
            }
        }
    }
}
