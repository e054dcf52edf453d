//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter. Every store actor
//! logs with an `entity_type` field (`InventoryItem`, `MenuItem`, `Order`) and the
//! entity id, so the module path is left out of each line.
//!
//! ## Filtering
//!
//! `RUST_LOG` wins when set; otherwise the configured `log_filter` applies.
//!
//! ```bash
//! # Store traffic and service decisions
//! RUST_LOG=info cargo run
//!
//! # Full payloads at client entry points
//! RUST_LOG=debug cargo run
//!
//! # Only the order path
//! RUST_LOG=hot_coffee::service=debug,hot_coffee::order_actor=debug cargo run
//! ```
//!
//! ## Order creation trace
//!
//! ```text
//! INFO create_order: Sending create_order to actor customer="Ann"
//! DEBUG Command entity_type="InventoryItem" command=Allocate { order_id: OrderId(1), .. }
//! DEBUG Command ok entity_type="InventoryItem"
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO create_order: Order created order_id=order_1
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. A second call is a no-op, which keeps tests that
/// share a process from panicking.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type carries the context instead
        .compact()
        .try_init();
}
