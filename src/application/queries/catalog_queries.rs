//! Catalog Queries - 动态投影

#[derive(Debug, Clone)]
pub struct ListTables;

#[derive(Debug, Clone)]
pub struct ListAttributes {
    pub table_name: String,
}

#[derive(Debug, Clone)]
pub struct ProjectTable {
    pub table_name: String,
    pub attributes: Vec<String>,
}
