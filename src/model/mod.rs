//! # Domain Models
//!
//! Plain data: ingredients, menu items, orders and the report shapes built from them.
//! The `ActorEntity` implementations live next to each actor, not here.

pub mod ids;
pub mod inventory;
pub mod menu;
pub mod order;
pub mod report;

pub use ids::*;
pub use inventory::*;
pub use menu::*;
pub use order::*;
pub use report::*;
