//! Admin Commands

/// 删除全部表并重建、写入演示数据
#[derive(Debug, Clone)]
pub struct ResetDatabase;
