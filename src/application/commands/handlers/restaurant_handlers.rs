//! Restaurant Command Handlers - 餐厅与菜品

use std::sync::Arc;

use crate::application::commands::{
    CreateMenuItem, CreateRestaurant, DeleteMenuItem, DeleteRestaurant, UpdateMenuItemCost,
    UpdateRestaurant,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    MenuItemRepositoryPort, NewMenuItem, NewRestaurant, RestaurantRejection,
    RestaurantRepositoryPort, RestaurantUpdate,
};
use crate::domain::{Cost, PostalCode, StreetAddress};

const MAX_NAME_LEN: usize = 30;
const MAX_LONG_NAME_LEN: usize = 50;
const MENU_ITEM_MISSING: &str = "No menu item with that name exists at that restaurant!";

fn require_positive(value: i64, field: &str) -> Result<i64, ApplicationError> {
    if value <= 0 {
        return Err(ApplicationError::validation(format!(
            "{field} must be a positive number"
        )));
    }
    Ok(value)
}

fn require_name(raw: &str, field: &str, max_len: usize) -> Result<String, ApplicationError> {
    let name = raw.trim();
    if name.is_empty() || name.chars().count() > max_len {
        return Err(ApplicationError::validation(format!(
            "{field} must be between 1 and {max_len} characters"
        )));
    }
    Ok(name.to_string())
}

// ============================================================================
// Restaurant
// ============================================================================

/// CreateRestaurant Handler
pub struct CreateRestaurantHandler {
    restaurant_repo: Arc<dyn RestaurantRepositoryPort>,
}

impl CreateRestaurantHandler {
    pub fn new(restaurant_repo: Arc<dyn RestaurantRepositoryPort>) -> Self {
        Self { restaurant_repo }
    }

    pub async fn handle(&self, command: CreateRestaurant) -> Result<(), ApplicationError> {
        let business_number = require_positive(command.business_number, "Business number")?;
        let name = require_name(&command.name, "Restaurant name", MAX_LONG_NAME_LEN)?;
        let postal_code = PostalCode::new(command.postal_code).map_err(ApplicationError::validation)?;
        let address = StreetAddress::new(command.house_number, command.street_name, postal_code)
            .map_err(ApplicationError::validation)?;
        let city_name = require_name(&command.city_name, "City name", MAX_NAME_LEN)?;
        let owner_id = require_positive(command.owner_id, "Owner SIN")?;

        let restaurant = NewRestaurant {
            business_number,
            name,
            address,
            city_name,
            owner_id,
        };
        self.restaurant_repo.insert(&restaurant).await?;

        tracing::info!(
            business_number,
            address = %restaurant.address,
            "Restaurant created"
        );
        Ok(())
    }
}

/// UpdateRestaurant Handler
pub struct UpdateRestaurantHandler {
    restaurant_repo: Arc<dyn RestaurantRepositoryPort>,
}

impl UpdateRestaurantHandler {
    pub fn new(restaurant_repo: Arc<dyn RestaurantRepositoryPort>) -> Self {
        Self { restaurant_repo }
    }

    pub async fn handle(&self, command: UpdateRestaurant) -> Result<(), ApplicationError> {
        let update = RestaurantUpdate {
            business_number: require_positive(command.business_number, "Business number")?,
            name: command
                .name
                .as_deref()
                .map(|n| require_name(n, "Restaurant name", MAX_LONG_NAME_LEN))
                .transpose()?,
            house_number: command
                .house_number
                .map(|h| require_positive(h, "House number"))
                .transpose()?,
            street_name: command
                .street_name
                .map(|s| {
                    let street = s.trim().to_string();
                    if street.is_empty() || street.chars().count() > StreetAddress::MAX_STREET_LEN {
                        Err(ApplicationError::validation(
                            "Street name must be between 1 and 50 characters",
                        ))
                    } else {
                        Ok(street)
                    }
                })
                .transpose()?,
            postal_code: command
                .postal_code
                .map(PostalCode::new)
                .transpose()
                .map_err(ApplicationError::validation)?,
            city_name: command
                .city_name
                .as_deref()
                .map(|c| require_name(c, "City name", MAX_NAME_LEN))
                .transpose()?,
            owner_id: command
                .owner_id
                .map(|o| require_positive(o, "Owner SIN"))
                .transpose()?,
        };

        if update.is_empty() {
            return Err(ApplicationError::validation("Nothing to update"));
        }

        self.restaurant_repo.update(&update).await?;

        tracing::info!(
            business_number = update.business_number,
            address_changed = update.touches_address(),
            "Restaurant updated"
        );
        Ok(())
    }
}

/// DeleteRestaurant Handler
pub struct DeleteRestaurantHandler {
    restaurant_repo: Arc<dyn RestaurantRepositoryPort>,
}

impl DeleteRestaurantHandler {
    pub fn new(restaurant_repo: Arc<dyn RestaurantRepositoryPort>) -> Self {
        Self { restaurant_repo }
    }

    pub async fn handle(&self, command: DeleteRestaurant) -> Result<(), ApplicationError> {
        if !self.restaurant_repo.delete(command.business_number).await? {
            return Err(ApplicationError::not_found(
                RestaurantRejection::RestaurantMissing.message(),
            ));
        }

        tracing::info!(business_number = command.business_number, "Restaurant deleted");
        Ok(())
    }
}

// ============================================================================
// Menu Item
// ============================================================================

/// CreateMenuItem Handler
pub struct CreateMenuItemHandler {
    menu_item_repo: Arc<dyn MenuItemRepositoryPort>,
}

impl CreateMenuItemHandler {
    pub fn new(menu_item_repo: Arc<dyn MenuItemRepositoryPort>) -> Self {
        Self { menu_item_repo }
    }

    pub async fn handle(&self, command: CreateMenuItem) -> Result<(), ApplicationError> {
        let item = NewMenuItem {
            business_number: require_positive(command.business_number, "Business number")?,
            name: require_name(&command.name, "Menu item name", MAX_LONG_NAME_LEN)?,
            item_type: require_name(&command.item_type, "Menu item type", MAX_NAME_LEN)?,
            cost: Cost::new(command.cost).map_err(ApplicationError::validation)?,
        };
        self.menu_item_repo.insert(&item).await?;

        tracing::info!(
            business_number = item.business_number,
            name = %item.name,
            item_type = %item.item_type,
            "Menu item created"
        );
        Ok(())
    }
}

/// DeleteMenuItem Handler
pub struct DeleteMenuItemHandler {
    menu_item_repo: Arc<dyn MenuItemRepositoryPort>,
}

impl DeleteMenuItemHandler {
    pub fn new(menu_item_repo: Arc<dyn MenuItemRepositoryPort>) -> Self {
        Self { menu_item_repo }
    }

    pub async fn handle(&self, command: DeleteMenuItem) -> Result<(), ApplicationError> {
        let deleted = self
            .menu_item_repo
            .delete(command.business_number, command.name.trim())
            .await?;
        if !deleted {
            return Err(ApplicationError::not_found(MENU_ITEM_MISSING));
        }

        tracing::info!(
            business_number = command.business_number,
            name = %command.name,
            "Menu item deleted"
        );
        Ok(())
    }
}

/// UpdateMenuItemCost Handler
pub struct UpdateMenuItemCostHandler {
    menu_item_repo: Arc<dyn MenuItemRepositoryPort>,
}

impl UpdateMenuItemCostHandler {
    pub fn new(menu_item_repo: Arc<dyn MenuItemRepositoryPort>) -> Self {
        Self { menu_item_repo }
    }

    pub async fn handle(&self, command: UpdateMenuItemCost) -> Result<(), ApplicationError> {
        let cost = Cost::new(command.cost).map_err(ApplicationError::validation)?;
        let updated = self
            .menu_item_repo
            .update_cost(command.business_number, command.name.trim(), cost)
            .await?;
        if !updated {
            return Err(ApplicationError::not_found(MENU_ITEM_MISSING));
        }

        tracing::info!(
            business_number = command.business_number,
            name = %command.name,
            cost = cost.value(),
            "Menu item cost updated"
        );
        Ok(())
    }
}
