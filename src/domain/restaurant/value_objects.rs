//! Restaurant Context - Value Objects

use serde::{Deserialize, Serialize};

/// 邮编（最长 7 个字符，如 `V6T 1Z4`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostalCode(String);

impl PostalCode {
    pub const MAX_LEN: usize = 7;

    pub fn new(code: impl Into<String>) -> Result<Self, &'static str> {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err("Postal code cannot be empty");
        }
        if code.chars().count() > Self::MAX_LEN {
            return Err("Postal code cannot be longer than 7 characters");
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 街道地址，Address 表的复合主键
///
/// 不变量:
/// - 门牌号为正数
/// - 街道名非空且不超过 50 字符
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreetAddress {
    house_number: i64,
    street_name: String,
    postal_code: PostalCode,
}

impl StreetAddress {
    pub const MAX_STREET_LEN: usize = 50;

    pub fn new(
        house_number: i64,
        street_name: impl Into<String>,
        postal_code: PostalCode,
    ) -> Result<Self, &'static str> {
        if house_number <= 0 {
            return Err("House number must be a positive number");
        }
        let street_name = street_name.into().trim().to_string();
        if street_name.is_empty() {
            return Err("Street name cannot be empty");
        }
        if street_name.chars().count() > Self::MAX_STREET_LEN {
            return Err("Street name cannot be longer than 50 characters");
        }
        Ok(Self {
            house_number,
            street_name,
            postal_code,
        })
    }

    pub fn house_number(&self) -> i64 {
        self.house_number
    }

    pub fn street_name(&self) -> &str {
        &self.street_name
    }

    pub fn postal_code(&self) -> &PostalCode {
        &self.postal_code
    }
}

impl std::fmt::Display for StreetAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.house_number, self.street_name, self.postal_code
        )
    }
}

/// 菜品价格，对应 DECIMAL(7,2)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Cost(f64);

impl Cost {
    /// 7 位有效数字、2 位小数的上限（不含）
    pub const UPPER_BOUND: f64 = 100_000.0;

    pub fn new(value: f64) -> Result<Self, &'static str> {
        if !value.is_finite() || value < 0.0 {
            return Err("Cost must be a non-negative number");
        }
        let rounded = (value * 100.0).round() / 100.0;
        if rounded >= Self::UPPER_BOUND {
            return Err("Cost must be less than 100000");
        }
        Ok(Self(rounded))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postal_code_trims_and_limits_length() {
        assert_eq!(PostalCode::new(" V6T 1Z4 ").unwrap().as_str(), "V6T 1Z4");
        assert!(PostalCode::new("").is_err());
        assert!(PostalCode::new("V6T 1Z4X").is_err());
    }

    #[test]
    fn test_street_address_display() {
        let address =
            StreetAddress::new(601, "W Hastings Street", PostalCode::new("V6B 1M8").unwrap())
                .unwrap();
        assert_eq!(address.to_string(), "601 W Hastings Street V6B 1M8");
    }

    #[test]
    fn test_street_address_rejects_bad_parts() {
        let postal = PostalCode::new("V6B 1M8").unwrap();
        assert!(StreetAddress::new(0, "Main", postal.clone()).is_err());
        assert!(StreetAddress::new(12, "   ", postal).is_err());
    }

    #[test]
    fn test_cost_rounds_to_cents() {
        assert_eq!(Cost::new(19.994).unwrap().value(), 19.99);
        assert!(Cost::new(-1.0).is_err());
        assert!(Cost::new(f64::NAN).is_err());
        assert!(Cost::new(100_000.0).is_err());
    }
}
