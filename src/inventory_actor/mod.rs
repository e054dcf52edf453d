//! # Inventory Actor
//!
//! Owns ingredient stock. Besides CRUD it exposes two kinds of operations:
//!
//! - [`InventoryAction`]: per ingredient (restocking).
//! - [`InventoryCommand`]: over the whole store. Allocation for an order is one command,
//!   checked and applied in a single step so concurrent orders are serialised here.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for
//!   [`InventoryItem`]
//! - [`error`] - [`InventoryError`]
//! - [`commands`] - [`InventoryCommand`] and [`InventoryCommandResult`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod commands;
pub mod entity;
pub mod error;

pub use commands::*;
pub use entity::{InventoryAction, InventoryActionResult};
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::InventoryItem;

/// Creates a new Inventory actor and its client.
pub fn new(
    mailbox_capacity: usize,
) -> (ResourceActor<InventoryItem>, ResourceClient<InventoryItem>) {
    ResourceActor::new(mailbox_capacity)
}
