//! A customer order and its status history.
//!
//! Orders are created `open` and move `open -> in progress -> closed`. While open, the
//! customer and the items may still change; after that only the status does. Every
//! transition is appended to `history`, starting with `(None -> open)` at creation.
//!
//! [`OrderDraft`] is what callers hand to the order service. [`OrderCreate`] and
//! [`OrderUpdate`] are the validated payloads the service sends to the order actor,
//! carrying the ingredient requirement the actor allocates from inventory.

use crate::model::{MenuItemId, OrderId, Requirement};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "closed")]
    Closed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in progress",
            Self::Closed => "closed",
        }
    }

    /// The only status that may follow this one.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            Self::Open => Some(Self::InProgress),
            Self::InProgress => Some(Self::Closed),
            Self::Closed => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the status history. `from` is `None` for the creation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub order_id: OrderId,
    pub from: Option<OrderStatus>,
    pub to: OrderStatus,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: MenuItemId,
    /// Signed so that bad input can be represented and rejected.
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,
}

impl OrderItem {
    pub fn new(product_id: MenuItemId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
            customization: None,
        }
    }

    pub fn with_customization(mut self, note: impl Into<String>) -> Self {
        self.customization = Some(note.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub history: Vec<StatusChange>,
    /// Ingredients taken from inventory for this order.
    #[serde(skip)]
    pub allocation: Requirement,
}

impl Order {
    /// The order can still be edited or deleted.
    pub fn is_modifiable(&self) -> bool {
        self.status == OrderStatus::Open
    }
}

/// An order as submitted by a caller, before validation.
///
/// `id` must be absent on create and, on update, equal to the id being updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub id: Option<OrderId>,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

impl OrderDraft {
    pub fn new(customer_name: impl Into<String>, items: Vec<OrderItem>) -> Self {
        Self {
            id: None,
            customer_name: customer_name.into(),
            items,
            status: None,
        }
    }
}

/// Validated payload for the order actor's create.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    /// Ingredients to take from inventory before the order is stored.
    pub allocation: Requirement,
}

/// Validated payload for the order actor's update.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Replaces whatever the order held before.
    pub allocation: Requirement,
    pub at: DateTime<Utc>,
}
