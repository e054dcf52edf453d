//! Error types for the Inventory actor.

use crate::error::ErrorKind;
use crate::model::IngredientId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during inventory operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    /// The requested ingredient was not found.
    #[error("Ingredient not found: {0}")]
    NotFound(String),

    #[error("Ingredient name must not be empty")]
    EmptyName,

    #[error("Invalid quantity: {0}")]
    NegativeQuantity(Decimal),

    #[error("Invalid price: {0}")]
    NegativePrice(Decimal),

    /// Restocking would push the stock past the largest representable amount.
    #[error("Restock of {0} exceeds the largest representable quantity")]
    QuantityTooLarge(IngredientId),

    /// A requirement refers to an ingredient that is not stocked.
    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(IngredientId),

    /// Allocating would take the ingredient below zero.
    #[error("Insufficient {name} ({ingredient_id}): requested {requested}, available {available}")]
    InsufficientIngredient {
        ingredient_id: IngredientId,
        name: String,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Invalid page request: page {page}, page size {page_size}")]
    InvalidPage { page: usize, page_size: usize },

    /// The inventory actor could not be reached.
    #[error("Inventory unavailable: {0}")]
    Unavailable(String),
}

impl InventoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::EmptyName
            | Self::NegativeQuantity(_)
            | Self::NegativePrice(_)
            | Self::QuantityTooLarge(_)
            | Self::UnknownIngredient(_)
            | Self::InvalidPage { .. } => ErrorKind::Validation,
            Self::InsufficientIngredient { .. } => ErrorKind::Conflict,
            Self::Unavailable(_) => ErrorKind::Internal,
        }
    }
}
