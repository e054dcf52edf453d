//! Actions and commands of the Order actor.

use crate::model::{MenuItemId, Order, OrderStatus, StatusChange};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Per-order operations beyond CRUD.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Compare-and-set: move to `to` only if the order is currently `from`.
    Transition {
        from: OrderStatus,
        to: OrderStatus,
        at: DateTime<Utc>,
    },
}

/// Results from OrderAction - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    /// The history entry that was appended.
    Transition(StatusChange),
}

/// Queries over all orders.
#[derive(Debug, Clone)]
pub enum OrderCommand {
    /// Orders in the given status, by id.
    WithStatus(OrderStatus),
    /// Units of closed orders created in `year` (and `month`, 1-12, when given), bucketed
    /// by day of month when a month is given, otherwise by month number.
    ClosedUnitsByPeriod { year: i32, month: Option<u32> },
    /// Units per product over orders of any status created within the inclusive date
    /// bounds.
    ItemCounts {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// Full-text match over customer name and ordered item names.
    Search {
        terms: Vec<String>,
        item_names: BTreeMap<MenuItemId, String>,
    },
}

/// An order with its search relevance.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredOrder {
    pub order: Order,
    pub relevance: f64,
}

/// Results from OrderCommand - variants match 1:1 with OrderCommand
#[derive(Debug, Clone)]
pub enum OrderCommandResult {
    WithStatus(Vec<Order>),
    ClosedUnitsByPeriod(BTreeMap<u32, u64>),
    ItemCounts(BTreeMap<MenuItemId, u64>),
    Search(Vec<ScoredOrder>),
}
