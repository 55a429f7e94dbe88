//! 认证编号
//!
//! 每个认证用户持有一个 [0, 1_000_000) 范围内的随机编号，全局唯一

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 认证编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationNumber(u32);

impl VerificationNumber {
    /// 编号上限（不含）
    pub const UPPER_BOUND: u32 = 1_000_000;

    pub fn new(value: u32) -> Result<Self, &'static str> {
        if value >= Self::UPPER_BOUND {
            return Err("Verification number must be below 1000000");
        }
        Ok(Self(value))
    }

    /// 均匀随机抽取一个编号
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..Self::UPPER_BOUND))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for VerificationNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_numbers_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let n = VerificationNumber::random(&mut rng);
            assert!(n.value() < VerificationNumber::UPPER_BOUND);
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(VerificationNumber::new(999_999).is_ok());
        assert!(VerificationNumber::new(1_000_000).is_err());
    }
}
