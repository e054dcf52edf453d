//! # Lifecycle
//!
//! Starting, wiring and stopping the back office.
//!
//! - [`CoffeeShop`] - spawns the store actors and builds the services over them
//! - [`load_config`] - [`ShopConfig`] from defaults and `HOT_COFFEE__*` variables
//! - [`setup_tracing`] - installs the log subscriber

pub mod coffee_shop;
pub mod config;
pub mod tracing;

pub use self::config::*;
pub use self::tracing::*;
pub use coffee_shop::*;
