//! Random Verification Numbers
//!
//! 每次从线程本地随机数生成器均匀抽取一个编号

use crate::application::ports::VerificationNumberSource;
use crate::domain::VerificationNumber;

/// 均匀随机的认证编号来源
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomVerificationNumbers;

impl RandomVerificationNumbers {
    pub fn new() -> Self {
        Self
    }
}

impl VerificationNumberSource for RandomVerificationNumbers {
    fn next_number(&self) -> VerificationNumber {
        VerificationNumber::random(&mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_numbers_stay_in_range() {
        let source = RandomVerificationNumbers::new();
        for _ in 0..1000 {
            assert!(source.next_number().value() < VerificationNumber::UPPER_BOUND);
        }
    }

    #[test]
    fn test_numbers_vary() {
        let source = RandomVerificationNumbers::new();
        let drawn: HashSet<u32> = (0..100).map(|_| source.next_number().value()).collect();
        assert!(drawn.len() > 1);
    }
}
