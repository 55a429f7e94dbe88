//! Catalog Query Handlers
//!
//! 表名与列名只接受目录中存在的名字

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CatalogPort, ProjectedRow};
use crate::application::queries::{ListAttributes, ListTables, ProjectTable};
use crate::domain::{resolve_identifier, CatalogTable, Projection};

/// 在目录中查找表并读取其列
async fn load_table(catalog: &dyn CatalogPort, requested: &str) -> Result<CatalogTable, ApplicationError> {
    let tables = catalog.list_tables().await?;
    let name = resolve_identifier(requested, &tables)
        .ok_or_else(|| ApplicationError::not_found(format!("Table {} does not exist", requested.trim())))?
        .to_string();

    let columns = catalog.list_columns(&name).await?;
    if columns.is_empty() {
        return Err(ApplicationError::not_found(format!(
            "Table {} has no attributes",
            name
        )));
    }
    Ok(CatalogTable { name, columns })
}

/// ListTables Handler
pub struct ListTablesHandler {
    catalog: Arc<dyn CatalogPort>,
}

impl ListTablesHandler {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self, _query: ListTables) -> Result<Vec<String>, ApplicationError> {
        let tables = self.catalog.list_tables().await?;
        if tables.is_empty() {
            return Err(ApplicationError::not_found("No tables found"));
        }
        Ok(tables)
    }
}

/// ListAttributes Handler
pub struct ListAttributesHandler {
    catalog: Arc<dyn CatalogPort>,
}

impl ListAttributesHandler {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self, query: ListAttributes) -> Result<Vec<String>, ApplicationError> {
        let table = load_table(self.catalog.as_ref(), &query.table_name).await?;
        Ok(table.columns)
    }
}

/// ProjectTable Handler
pub struct ProjectTableHandler {
    catalog: Arc<dyn CatalogPort>,
}

impl ProjectTableHandler {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self, query: ProjectTable) -> Result<Vec<ProjectedRow>, ApplicationError> {
        let table = load_table(self.catalog.as_ref(), &query.table_name).await?;
        let projection = Projection::resolve(&table, &query.attributes)
            .map_err(|e| ApplicationError::validation(e.to_string()))?;

        let rows = self.catalog.project(&projection).await?;
        tracing::debug!(
            table = projection.table(),
            columns = ?projection.columns(),
            rows = rows.len(),
            "Projection executed"
        );
        Ok(rows)
    }
}
