//! Error types for the Order actor and the order service.

use crate::error::ErrorKind;
use crate::inventory_actor::InventoryError;
use crate::model::{IngredientId, MenuItemId, OrderId, OrderStatus};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Customer name must not be empty")]
    EmptyCustomerName,

    #[error("Order must contain at least one item")]
    NoItems,

    #[error("Quantity for {product_id} must be positive, got {quantity}")]
    NonPositiveQuantity { product_id: MenuItemId, quantity: i64 },

    /// Ingredient amounts or the order total for this product no longer fit a `Decimal`.
    #[error("Quantity for {product_id} is too large")]
    QuantityTooLarge { product_id: MenuItemId },

    /// An item refers to a product that is not on the menu.
    #[error("Menu item does not exist: {0}")]
    UnknownMenuItem(MenuItemId),

    /// A recipe refers to an ingredient that is no longer stocked.
    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(IngredientId),

    /// Ids are assigned by the store, a new order must not carry one.
    #[error("Order id must not be set on create, got {0}")]
    IdAssigned(OrderId),

    #[error("Order id mismatch: path {path}, body {body}")]
    IdMismatch { path: OrderId, body: OrderId },

    #[error("Malformed order id: {0:?}")]
    MalformedId(String),

    /// Only open orders can be edited or deleted.
    #[error("Order {id} is {status} and can no longer be modified")]
    NotModifiable { id: OrderId, status: OrderStatus },

    #[error("Incorrect status: cannot move from {current} to {requested}")]
    IncorrectStatus {
        current: OrderStatus,
        requested: OrderStatus,
    },

    /// Not enough of one ingredient in stock.
    #[error("Insufficient ingredient: {name} ({ingredient_id})")]
    InsufficientIngredient {
        ingredient_id: IngredientId,
        name: String,
    },

    #[error("Revenue of {0} exceeds the largest representable amount")]
    RevenueOverflow(OrderId),

    #[error("Total sales exceed the largest representable amount")]
    SalesOverflow,

    /// A store could not be reached.
    #[error("Order store unavailable: {0}")]
    Unavailable(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::EmptyCustomerName
            | Self::NoItems
            | Self::NonPositiveQuantity { .. }
            | Self::QuantityTooLarge { .. }
            | Self::UnknownMenuItem(_)
            | Self::UnknownIngredient(_)
            | Self::IdAssigned(_)
            | Self::IdMismatch { .. }
            | Self::MalformedId(_) => ErrorKind::Validation,
            Self::NotModifiable { .. } | Self::IncorrectStatus { .. } => ErrorKind::State,
            Self::InsufficientIngredient { .. } => ErrorKind::Conflict,
            Self::RevenueOverflow(_) | Self::SalesOverflow | Self::Unavailable(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Inventory failures as seen from an order.
impl From<InventoryError> for OrderError {
    fn from(e: InventoryError) -> Self {
        match e {
            InventoryError::InsufficientIngredient {
                ingredient_id,
                name,
                ..
            } => Self::InsufficientIngredient {
                ingredient_id,
                name,
            },
            InventoryError::UnknownIngredient(id) => Self::UnknownIngredient(id),
            other => Self::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn shortfall_keeps_the_ingredient() {
        let e = OrderError::from(InventoryError::InsufficientIngredient {
            ingredient_id: IngredientId(4),
            name: "Milk".into(),
            requested: dec!(10),
            available: dec!(2),
        });
        assert_eq!(
            e,
            OrderError::InsufficientIngredient {
                ingredient_id: IngredientId(4),
                name: "Milk".into()
            }
        );
        assert_eq!(e.kind(), ErrorKind::Conflict);
        assert!(e.to_string().contains("Milk"));
    }

    #[test]
    fn kinds() {
        assert_eq!(OrderError::NoItems.kind(), ErrorKind::Validation);
        assert_eq!(
            OrderError::QuantityTooLarge {
                product_id: MenuItemId(1)
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(OrderError::SalesOverflow.kind(), ErrorKind::Internal);
        assert_eq!(
            OrderError::IncorrectStatus {
                current: OrderStatus::Open,
                requested: OrderStatus::Closed
            }
            .kind(),
            ErrorKind::State
        );
        assert_eq!(
            OrderError::from(InventoryError::Unavailable("closed".into())).kind(),
            ErrorKind::Internal
        );
    }
}
