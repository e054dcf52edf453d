//! [`ActorEntity`] implementation for [`InventoryItem`].

use super::commands::{InventoryCommand, InventoryCommandResult};
use super::error::InventoryError;
use crate::framework::{ActorEntity, Store};
use crate::model::{
    IngredientId, IngredientUsage, InventoryCreate, InventoryItem, InventoryPage, InventorySort,
    InventoryUpdate, OrderId, PageInventoryItem, Requirement,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Per-ingredient operations beyond CRUD.
#[derive(Debug, Clone)]
pub enum InventoryAction {
    /// Add delivered stock. The amount must be positive.
    Restock(Decimal),
}

/// Results from InventoryAction - variants match 1:1 with InventoryAction
#[derive(Debug, Clone)]
pub enum InventoryActionResult {
    /// New quantity on hand.
    Restock(Decimal),
}

impl InventoryItem {
    fn validate(&self) -> Result<(), InventoryError> {
        if self.name.trim().is_empty() {
            return Err(InventoryError::EmptyName);
        }
        if self.quantity < Decimal::ZERO {
            return Err(InventoryError::NegativeQuantity(self.quantity));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(InventoryError::NegativePrice(self.unit_price));
        }
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for InventoryItem {
    type Id = IngredientId;
    type Create = InventoryCreate;
    type Update = InventoryUpdate;
    type Action = InventoryAction;
    type ActionResult = InventoryActionResult;
    type Command = InventoryCommand;
    type CommandResult = InventoryCommandResult;
    type Context = ();
    type Error = InventoryError;

    fn from_create_params(id: IngredientId, params: InventoryCreate) -> Result<Self, Self::Error> {
        let item = Self::new(
            id,
            params.name,
            params.unit,
            params.quantity,
            params.unit_price,
        );
        item.validate()?;
        Ok(item)
    }

    async fn on_update(&mut self, update: InventoryUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(unit_price) = update.unit_price {
            self.unit_price = unit_price;
        }
        self.validate()
    }

    async fn handle_action(
        &mut self,
        action: InventoryAction,
        _ctx: &(),
    ) -> Result<InventoryActionResult, Self::Error> {
        match action {
            InventoryAction::Restock(amount) => {
                if amount <= Decimal::ZERO {
                    return Err(InventoryError::NegativeQuantity(amount));
                }
                self.quantity = self
                    .quantity
                    .checked_add(amount)
                    .ok_or(InventoryError::QuantityTooLarge(self.id))?;
                Ok(InventoryActionResult::Restock(self.quantity))
            }
        }
    }

    async fn handle_command(
        store: &mut Store<Self>,
        command: InventoryCommand,
        _ctx: &(),
    ) -> Result<InventoryCommandResult, Self::Error> {
        match command {
            InventoryCommand::Allocate {
                order_id,
                requirement,
            } => allocate(store, order_id, requirement).map(InventoryCommandResult::Allocate),
            InventoryCommand::Release { order_id } => {
                Ok(InventoryCommandResult::Release(release(store, order_id)))
            }
            InventoryCommand::Usage { order_ids } => {
                Ok(InventoryCommandResult::Usage(usage(store, &order_ids)))
            }
            InventoryCommand::Page {
                sort,
                page,
                page_size,
            } => paginate(store, sort, page, page_size).map(InventoryCommandResult::Page),
        }
    }
}

/// Check the whole requirement, then apply it. Nothing changes on error.
///
/// Stock the order already holds counts as available, since it is given back first.
fn allocate(
    store: &mut Store<InventoryItem>,
    order_id: OrderId,
    requirement: Requirement,
) -> Result<(), InventoryError> {
    // BTreeMap order: the lowest short ingredient id is the one reported.
    for (ingredient_id, requested) in &requirement {
        let item = store
            .get(ingredient_id)
            .ok_or(InventoryError::UnknownIngredient(*ingredient_id))?;
        if *requested < Decimal::ZERO {
            return Err(InventoryError::NegativeQuantity(*requested));
        }
        let available = item.quantity.saturating_add(item.allocated_to(order_id));
        if available < *requested {
            return Err(InventoryError::InsufficientIngredient {
                ingredient_id: *ingredient_id,
                name: item.name.clone(),
                requested: *requested,
                available,
            });
        }
    }

    release(store, order_id);
    for (ingredient_id, requested) in requirement {
        if requested.is_zero() {
            continue;
        }
        if let Some(item) = store.get_mut(&ingredient_id) {
            item.quantity -= requested;
            item.allocations.insert(order_id, requested);
        }
    }
    Ok(())
}

fn release(store: &mut Store<InventoryItem>, order_id: OrderId) -> Requirement {
    let mut released = Requirement::new();
    for item in store.values_mut() {
        if let Some(held) = item.allocations.remove(&order_id) {
            item.quantity = item.quantity.saturating_add(held);
            released.insert(item.id, held);
        }
    }
    released
}

fn usage(store: &Store<InventoryItem>, order_ids: &[OrderId]) -> Vec<IngredientUsage> {
    let wanted: BTreeSet<OrderId> = order_ids.iter().copied().collect();
    store
        .values()
        .filter_map(|item| {
            let used: Decimal = item
                .allocations
                .iter()
                .filter(|(order_id, _)| wanted.contains(order_id))
                .fold(Decimal::ZERO, |sum, (_, quantity)| sum.saturating_add(*quantity));
            (!used.is_zero()).then(|| IngredientUsage {
                ingredient_id: item.id,
                name: item.name.clone(),
                quantity_used: used,
                remaining: item.quantity,
            })
        })
        .collect()
}

fn paginate(
    store: &Store<InventoryItem>,
    sort: InventorySort,
    page: usize,
    page_size: usize,
) -> Result<InventoryPage, InventoryError> {
    if page == 0 || page_size == 0 {
        return Err(InventoryError::InvalidPage { page, page_size });
    }

    let mut items: Vec<&InventoryItem> = store.values().collect();
    // Stable sort keeps id order among equal keys.
    match sort {
        InventorySort::Name => items.sort_by(|a, b| a.name.cmp(&b.name)),
        InventorySort::Quantity => items.sort_by(|a, b| a.quantity.cmp(&b.quantity)),
        InventorySort::Price => items.sort_by(|a, b| a.unit_price.cmp(&b.unit_price)),
    }

    let total_pages = items.len().div_ceil(page_size);
    let rows = items
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .map(|item| PageInventoryItem {
            name: item.name.clone(),
            price: item.unit_price,
            quantity: item.quantity,
        })
        .collect();

    Ok(InventoryPage {
        current_page: page,
        has_next_page: page < total_pages,
        page_size,
        total_pages,
        items: rows,
    })
}
