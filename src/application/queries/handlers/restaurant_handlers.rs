//! Restaurant Query Handlers - 餐厅、菜品与报表

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    MenuItemRecord, MenuItemRepositoryPort, RestaurantListing, RestaurantRepositoryPort,
    RestaurantSummary,
};
use crate::application::queries::{
    CheapestMenuItemsByType, ListMenuItemTypes, ListMenuItems, ListRestaurants,
    MostExpensiveMenuItemsByType, RestaurantsOfferingAllTypes,
};
use crate::domain::resolve_identifier;

/// ListRestaurants Handler
pub struct ListRestaurantsHandler {
    restaurant_repo: Arc<dyn RestaurantRepositoryPort>,
}

impl ListRestaurantsHandler {
    pub fn new(restaurant_repo: Arc<dyn RestaurantRepositoryPort>) -> Self {
        Self { restaurant_repo }
    }

    pub async fn handle(&self, _query: ListRestaurants) -> Result<Vec<RestaurantListing>, ApplicationError> {
        Ok(self.restaurant_repo.find_all().await?)
    }
}

/// ListMenuItems Handler
pub struct ListMenuItemsHandler {
    menu_item_repo: Arc<dyn MenuItemRepositoryPort>,
}

impl ListMenuItemsHandler {
    pub fn new(menu_item_repo: Arc<dyn MenuItemRepositoryPort>) -> Self {
        Self { menu_item_repo }
    }

    pub async fn handle(&self, _query: ListMenuItems) -> Result<Vec<MenuItemRecord>, ApplicationError> {
        Ok(self.menu_item_repo.find_all().await?)
    }
}

/// ListMenuItemTypes Handler
pub struct ListMenuItemTypesHandler {
    menu_item_repo: Arc<dyn MenuItemRepositoryPort>,
}

impl ListMenuItemTypesHandler {
    pub fn new(menu_item_repo: Arc<dyn MenuItemRepositoryPort>) -> Self {
        Self { menu_item_repo }
    }

    pub async fn handle(&self, _query: ListMenuItemTypes) -> Result<Vec<String>, ApplicationError> {
        Ok(self.menu_item_repo.find_types().await?)
    }
}

/// CheapestMenuItemsByType Handler
pub struct CheapestMenuItemsByTypeHandler {
    menu_item_repo: Arc<dyn MenuItemRepositoryPort>,
}

impl CheapestMenuItemsByTypeHandler {
    pub fn new(menu_item_repo: Arc<dyn MenuItemRepositoryPort>) -> Self {
        Self { menu_item_repo }
    }

    pub async fn handle(
        &self,
        _query: CheapestMenuItemsByType,
    ) -> Result<Vec<MenuItemRecord>, ApplicationError> {
        Ok(self.menu_item_repo.find_cheapest_by_type().await?)
    }
}

/// MostExpensiveMenuItemsByType Handler
pub struct MostExpensiveMenuItemsByTypeHandler {
    menu_item_repo: Arc<dyn MenuItemRepositoryPort>,
}

impl MostExpensiveMenuItemsByTypeHandler {
    pub fn new(menu_item_repo: Arc<dyn MenuItemRepositoryPort>) -> Self {
        Self { menu_item_repo }
    }

    pub async fn handle(
        &self,
        _query: MostExpensiveMenuItemsByType,
    ) -> Result<Vec<MenuItemRecord>, ApplicationError> {
        Ok(self.menu_item_repo.find_most_expensive_by_type().await?)
    }
}

/// RestaurantsOfferingAllTypes Handler
///
/// 请求的类型按受控词表规范化（忽略大小写、去重），未知类型直接拒绝
pub struct RestaurantsOfferingAllTypesHandler {
    menu_item_repo: Arc<dyn MenuItemRepositoryPort>,
}

impl RestaurantsOfferingAllTypesHandler {
    pub fn new(menu_item_repo: Arc<dyn MenuItemRepositoryPort>) -> Self {
        Self { menu_item_repo }
    }

    pub async fn handle(
        &self,
        query: RestaurantsOfferingAllTypes,
    ) -> Result<Vec<RestaurantSummary>, ApplicationError> {
        let known = self.menu_item_repo.find_types().await?;

        let mut types: Vec<String> = Vec::new();
        for requested in query.types.iter().filter(|t| !t.trim().is_empty()) {
            let canonical = resolve_identifier(requested, &known).ok_or_else(|| {
                ApplicationError::validation(format!(
                    "Unknown menu item type: {}",
                    requested.trim()
                ))
            })?;
            if !types.iter().any(|t| t == canonical) {
                types.push(canonical.to_string());
            }
        }

        let restaurants = self
            .menu_item_repo
            .find_restaurants_offering_all(&types)
            .await?;
        tracing::debug!(types = ?types, matches = restaurants.len(), "Division query");
        Ok(restaurants)
    }
}
