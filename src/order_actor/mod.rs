//! # Order Actor
//!
//! Owns orders and their status history. Runs with an
//! [`InventoryClient`](crate::clients::InventoryClient) as context so that creating,
//! updating and deleting an order moves stock in the same step.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for
//!   [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`commands`] - [`OrderAction`] (status compare-and-set) and [`OrderCommand`]
//!   (status filter, period buckets, item counts, search)
//! - [`new()`] - Factory function that creates the actor and client

pub mod commands;
pub mod entity;
pub mod error;

pub use commands::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(mailbox_capacity)
}
