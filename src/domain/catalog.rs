//! 数据库目录投影
//!
//! 表名、列名只能来自实时目录（白名单），经过规范化和引号转义后才会拼入 SQL

use thiserror::Error;

/// 投影错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("At least one attribute must be selected")]
    NoColumns,

    #[error("Unknown attribute '{column}' for table {table}")]
    UnknownColumn { table: String, column: String },
}

/// 目录中的一张表及其列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTable {
    pub name: String,
    pub columns: Vec<String>,
}

/// 在已知标识符中查找请求的名字
///
/// 优先精确匹配，其次忽略 ASCII 大小写匹配；返回目录中的规范写法
pub fn resolve_identifier<'a>(requested: &str, known: &'a [String]) -> Option<&'a str> {
    let requested = requested.trim();
    known
        .iter()
        .find(|k| k.as_str() == requested)
        .or_else(|| known.iter().find(|k| k.eq_ignore_ascii_case(requested)))
        .map(String::as_str)
}

/// SQL 标识符加双引号，内部双引号加倍
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// 已校验的投影：表名和列名均为目录中的规范名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    table: String,
    columns: Vec<String>,
}

impl Projection {
    /// 按目录校验请求的列，去重并保持请求顺序
    pub fn resolve(table: &CatalogTable, requested: &[String]) -> Result<Self, ProjectionError> {
        let mut columns: Vec<String> = Vec::with_capacity(requested.len());

        for column in requested {
            let canonical = resolve_identifier(column, &table.columns).ok_or_else(|| {
                ProjectionError::UnknownColumn {
                    table: table.name.clone(),
                    column: column.clone(),
                }
            })?;
            if !columns.iter().any(|c| c == canonical) {
                columns.push(canonical.to_string());
            }
        }

        if columns.is_empty() {
            return Err(ProjectionError::NoColumns);
        }

        Ok(Self {
            table: table.name.clone(),
            columns,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn to_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(|c| quote_identifier(c)).collect();
        format!(
            "SELECT {} FROM {}",
            columns.join(", "),
            quote_identifier(&self.table)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner_table() -> CatalogTable {
        CatalogTable {
            name: "Owner".to_string(),
            columns: vec!["SIN".to_string(), "Name".to_string()],
        }
    }

    #[test]
    fn test_resolve_identifier_is_case_insensitive() {
        let known = vec!["Owner".to_string(), "Review_User".to_string()];
        assert_eq!(resolve_identifier("OWNER", &known), Some("Owner"));
        assert_eq!(resolve_identifier(" review_user ", &known), Some("Review_User"));
        assert_eq!(resolve_identifier("Owner; DROP TABLE City", &known), None);
    }

    #[test]
    fn test_projection_canonicalises_and_dedupes() {
        let projection = Projection::resolve(
            &owner_table(),
            &["name".to_string(), "SIN".to_string(), "NAME".to_string()],
        )
        .unwrap();
        assert_eq!(projection.columns(), &["Name".to_string(), "SIN".to_string()]);
        assert_eq!(projection.to_sql(), "SELECT \"Name\", \"SIN\" FROM \"Owner\"");
    }

    #[test]
    fn test_projection_rejects_unknown_column() {
        let err = Projection::resolve(&owner_table(), &["SIN, 1".to_string()]).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::UnknownColumn {
                table: "Owner".to_string(),
                column: "SIN, 1".to_string()
            }
        );
    }

    #[test]
    fn test_projection_requires_columns() {
        assert_eq!(
            Projection::resolve(&owner_table(), &[]).unwrap_err(),
            ProjectionError::NoColumns
        );
    }

    #[test]
    fn test_quote_identifier_escapes_quotes() {
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
