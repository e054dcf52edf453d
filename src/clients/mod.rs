//! # Typed Clients
//!
//! One wrapper per actor over the generic [`ResourceClient`](crate::framework::ResourceClient).
//! They turn action and command result enums into plain return values and map
//! [`FrameworkError`](crate::framework::FrameworkError) into the resource's own error.
//! `get`, `list` and `delete` come from [`ActorClient`](crate::framework::ActorClient).

pub mod inventory_client;
pub mod menu_client;
pub mod order_client;

pub use inventory_client::InventoryClient;
pub use menu_client::MenuClient;
pub use order_client::OrderClient;
