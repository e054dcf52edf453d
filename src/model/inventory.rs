//! An ingredient in stock.
//!
//! # Actor Framework
//! Implements [`ActorEntity`](crate::framework::ActorEntity) in
//! [`inventory_actor`](crate::inventory_actor). Besides CRUD, the inventory actor allocates
//! stock to orders through collection-wide commands; `allocations` is the ledger of what
//! each order currently holds.

use crate::model::{IngredientId, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quantity needed per ingredient.
pub type Requirement = BTreeMap<IngredientId, Decimal>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: IngredientId,
    pub name: String,
    pub unit: String,
    /// On hand, never negative.
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(skip)]
    pub allocations: BTreeMap<OrderId, Decimal>,
}

impl InventoryItem {
    pub fn new(
        id: IngredientId,
        name: impl Into<String>,
        unit: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit: unit.into(),
            quantity,
            unit_price,
            allocations: BTreeMap::new(),
        }
    }

    /// What `order_id` currently holds of this ingredient.
    pub fn allocated_to(&self, order_id: OrderId) -> Decimal {
        self.allocations
            .get(&order_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Payload for creating an ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryCreate {
    pub name: String,
    pub unit: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Partial update. Absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
}

/// Sort key for paginated listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventorySort {
    #[default]
    Name,
    Quantity,
    Price,
}

/// One row of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageInventoryItem {
    pub name: String,
    pub price: Decimal,
    pub quantity: Decimal,
}

/// A page of the inventory, `current_page` counted from 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryPage {
    pub current_page: usize,
    pub has_next_page: bool,
    pub page_size: usize,
    pub total_pages: usize,
    pub items: Vec<PageInventoryItem>,
}

/// Consumption of one ingredient by a set of orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientUsage {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub quantity_used: Decimal,
    pub remaining: Decimal,
}
