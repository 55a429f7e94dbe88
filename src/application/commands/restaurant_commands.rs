//! Restaurant Commands - 餐厅与菜品

#[derive(Debug, Clone)]
pub struct CreateRestaurant {
    pub business_number: i64,
    pub name: String,
    pub house_number: i64,
    pub street_name: String,
    pub postal_code: String,
    pub city_name: String,
    pub owner_id: i64,
}

/// 部分更新餐厅：None 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct UpdateRestaurant {
    pub business_number: i64,
    pub name: Option<String>,
    pub house_number: Option<i64>,
    pub street_name: Option<String>,
    pub postal_code: Option<String>,
    pub city_name: Option<String>,
    pub owner_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct DeleteRestaurant {
    pub business_number: i64,
}

#[derive(Debug, Clone)]
pub struct CreateMenuItem {
    pub business_number: i64,
    pub name: String,
    pub item_type: String,
    pub cost: f64,
}

#[derive(Debug, Clone)]
pub struct DeleteMenuItem {
    pub business_number: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct UpdateMenuItemCost {
    pub business_number: i64,
    pub name: String,
    pub cost: f64,
}
