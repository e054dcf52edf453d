//! A menu item: what an order line refers to by product id.
//!
//! The recipe says how much of each ingredient one unit consumes. Creation and updates
//! are validated in [`menu_actor`](crate::menu_actor), including a lookup of every recipe
//! ingredient in inventory.

use crate::model::{IngredientId, MenuItemId, Requirement};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub recipe: Vec<RecipeLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub ingredient_id: IngredientId,
    /// Per unit of the menu item.
    pub quantity: Decimal,
}

impl RecipeLine {
    pub fn new(ingredient_id: IngredientId, quantity: Decimal) -> Self {
        Self {
            ingredient_id,
            quantity,
        }
    }
}

impl MenuItem {
    /// Adds what `units` of this item consume to `requirement`.
    ///
    /// `None` when an amount overflows; `requirement` is then only partly updated.
    #[must_use]
    pub fn add_requirement(&self, units: Decimal, requirement: &mut Requirement) -> Option<()> {
        for line in &self.recipe {
            let needed = line.quantity.checked_mul(units)?;
            let total = requirement
                .entry(line.ingredient_id)
                .or_insert(Decimal::ZERO);
            *total = total.checked_add(needed)?;
        }
        Some(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub recipe: Vec<RecipeLine>,
}

/// Partial update. The result is validated as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub recipe: Option<Vec<RecipeLine>>,
}

/// Units sold of one menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItemSales {
    pub product_id: MenuItemId,
    pub product_name: String,
    pub total_sales_count: u64,
}
