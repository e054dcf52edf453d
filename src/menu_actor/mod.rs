//! # Menu Actor
//!
//! Owns the menu. Creation and updates check the recipe against inventory, so the actor
//! runs with an [`InventoryClient`](crate::clients::InventoryClient) as its context.
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for
//!   [`MenuItem`], plus [`MenuCommand`] for search
//! - [`error`] - [`MenuError`]

pub mod entity;
pub mod error;

pub use entity::{MenuAction, MenuCommand, MenuCommandResult};
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::MenuItem;

/// Creates a new Menu actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<MenuItem>, ResourceClient<MenuItem>) {
    ResourceActor::new(mailbox_capacity)
}
