//! Restaurant Queries - 餐厅、菜品与报表

#[derive(Debug, Clone)]
pub struct ListRestaurants;

#[derive(Debug, Clone)]
pub struct ListMenuItems;

#[derive(Debug, Clone)]
pub struct ListMenuItemTypes;

#[derive(Debug, Clone)]
pub struct CheapestMenuItemsByType;

#[derive(Debug, Clone)]
pub struct MostExpensiveMenuItemsByType;

/// 菜单覆盖全部给定类型的餐厅；类型为空表示全部类型
#[derive(Debug, Clone, Default)]
pub struct RestaurantsOfferingAllTypes {
    pub types: Vec<String>,
}
