//! Error types for the Menu actor.

use crate::error::ErrorKind;
use crate::model::IngredientId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// The requested menu item was not found.
    #[error("Menu item not found: {0}")]
    NotFound(String),

    #[error("Menu item name must not be empty")]
    EmptyName,

    #[error("Menu item price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("Menu item must have at least one ingredient")]
    EmptyRecipe,

    #[error("Ingredient {0} appears twice in the recipe")]
    DuplicateIngredient(IngredientId),

    #[error("Recipe quantity for {0} must be positive")]
    NonPositiveIngredientQuantity(IngredientId),

    /// The recipe refers to an ingredient missing from inventory.
    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(IngredientId),

    /// The menu actor, or the inventory it validates against, could not be reached.
    #[error("Menu unavailable: {0}")]
    Unavailable(String),
}

impl MenuError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unavailable(_) => ErrorKind::Internal,
            _ => ErrorKind::Validation,
        }
    }
}
