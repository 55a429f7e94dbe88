//! Admin Queries

/// 数据库连通性检查
#[derive(Debug, Clone)]
pub struct CheckConnection;
