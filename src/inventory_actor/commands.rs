//! Collection-wide operations of the Inventory actor.
//!
//! Allocation touches several ingredients at once, so it cannot be a per-entity action:
//! the whole requirement is checked and then applied inside one request, which is what
//! keeps two concurrent orders from both passing a check only one of them can satisfy.

use crate::model::{IngredientUsage, InventoryPage, InventorySort, OrderId, Requirement};

#[derive(Debug, Clone)]
pub enum InventoryCommand {
    /// Make `requirement` the order's allocation, replacing any previous one.
    /// All or nothing.
    Allocate {
        order_id: OrderId,
        requirement: Requirement,
    },
    /// Give back everything the order holds.
    Release { order_id: OrderId },
    /// What the listed orders consumed, per ingredient, with the remaining stock.
    Usage { order_ids: Vec<OrderId> },
    /// One page of the listing, `page` counted from 1.
    Page {
        sort: InventorySort,
        page: usize,
        page_size: usize,
    },
}

/// Results from InventoryCommand - variants match 1:1 with InventoryCommand
#[derive(Debug, Clone)]
pub enum InventoryCommandResult {
    Allocate(()),
    /// The quantities returned to stock.
    Release(Requirement),
    Usage(Vec<IngredientUsage>),
    Page(InventoryPage),
}
