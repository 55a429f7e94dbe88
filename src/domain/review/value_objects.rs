//! Review Context - Value Objects

use serde::{Deserialize, Serialize};

/// 单项评分（1 到 5 分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn new(value: i64) -> Result<Self, &'static str> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err("Ratings must be whole numbers between 1 and 5");
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> i64 {
        i64::from(self.0)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 餐厅评论的三项评分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRatings {
    pub ambience: Rating,
    pub cleanliness: Rating,
    pub service: Rating,
}

impl RestaurantRatings {
    pub fn new(ambience: i64, cleanliness: i64, service: i64) -> Result<Self, &'static str> {
        Ok(Self {
            ambience: Rating::new(ambience)?,
            cleanliness: Rating::new(cleanliness)?,
            service: Rating::new(service)?,
        })
    }

    /// 综合评分：三项平均后四舍五入
    pub fn overall(&self) -> i64 {
        overall_rating(
            self.ambience.value(),
            self.cleanliness.value(),
            self.service.value(),
        )
    }
}

/// 菜品评论的三项评分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemRatings {
    pub presentation: Rating,
    pub taste: Rating,
    pub portion_size: Rating,
}

impl MenuItemRatings {
    pub fn new(presentation: i64, taste: i64, portion_size: i64) -> Result<Self, &'static str> {
        Ok(Self {
            presentation: Rating::new(presentation)?,
            taste: Rating::new(taste)?,
            portion_size: Rating::new(portion_size)?,
        })
    }
}

/// 对数据库中读出的原始评分计算综合评分
///
/// 三个整数的平均值小数部分只可能是 0、1/3、2/3，不存在 .5 的舍入歧义
pub fn overall_rating(ambience: i64, cleanliness: i64, service: i64) -> i64 {
    ((ambience + cleanliness + service) as f64 / 3.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(5).unwrap().value(), 5);
    }

    #[test]
    fn test_overall_rating_rounds_to_nearest() {
        // (3 + 4 + 2) / 3 = 3
        assert_eq!(overall_rating(3, 4, 2), 3);
        // (1 + 2 + 5) / 3 = 2.67
        assert_eq!(overall_rating(1, 2, 5), 3);
        // (4 + 3 + 5) / 3 = 4
        assert_eq!(overall_rating(4, 3, 5), 4);
        // (1 + 1 + 2) / 3 = 1.33
        assert_eq!(overall_rating(1, 1, 2), 1);
    }

    #[test]
    fn test_restaurant_ratings_overall() {
        let ratings = RestaurantRatings::new(5, 5, 4).unwrap();
        assert_eq!(ratings.overall(), 5);
        assert!(RestaurantRatings::new(5, 0, 4).is_err());
    }

    #[test]
    fn test_menu_item_ratings_validation() {
        assert!(MenuItemRatings::new(2, 2, 2).is_ok());
        assert!(MenuItemRatings::new(2, 9, 2).is_err());
    }
}
