//! Verification Number Source Port
//!
//! 认证编号的来源，生产环境为均匀随机数，测试可注入固定序列

use crate::domain::VerificationNumber;

pub trait VerificationNumberSource: Send + Sync {
    fn next_number(&self) -> VerificationNumber;
}
