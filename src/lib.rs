//! # Hot Coffee
//!
//! > **Back office for a coffee shop: orders, menu, inventory and the reports over them.**
//!
//! Every store is a Tokio actor that owns its data and processes requests one at a time.
//! Services on top validate input, decide status transitions and aggregate reports; they
//! hold clients, never data.
//!
//! ## Core Concepts
//!
//! ### One writer per store
//! `ResourceActor<T: ActorEntity>` runs the same message loop for ingredients, menu items
//! and orders. Because requests to one store are serialised, stock allocation is a single
//! check-and-apply step: two orders racing for the last liter of milk cannot both win.
//!
//! ### Eager allocation
//! Creating an order takes its ingredients from inventory before the order is stored.
//! Updating an open order replaces that allocation; deleting one gives it back. A failed
//! allocation leaves both stores untouched.
//!
//! ### Mocking
//! Store clients can be driven by hand with `MockClient`, see [`framework::mock`].
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic actor, client, request enum and error. Knows nothing about coffee.
//!
//! ### 2. The Stores ([`inventory_actor`], [`menu_actor`], [`order_actor`])
//! `ActorEntity` implementations with their actions, commands and errors. Plain data
//! types live in [`model`].
//!
//! ### 3. The Interface ([`clients`])
//! `InventoryClient`, `MenuClient`, `OrderClient`: typed wrappers over `ResourceClient`.
//!
//! ### 4. The Services ([`service`], [`batch`], [`search`])
//! - [`OrderService`](service::OrderService): order lifecycle, revenue, reports.
//! - [`BatchCoordinator`](batch::BatchCoordinator): many drafts at once, one summary.
//! - [`SearchService`](search::SearchService): full-text search over menu and orders.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`CoffeeShop`](lifecycle::CoffeeShop) spawns and wires everything; configuration and
//! tracing setup live next to it. Errors across the crate share [`error::ErrorKind`].
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Larger mailboxes, fewer concurrent batch drafts
//! HOT_COFFEE__MAILBOX_CAPACITY=256 HOT_COFFEE__BATCH_CONCURRENCY=2 cargo run
//!
//! cargo test
//! ```

pub mod batch;
pub mod clients;
pub mod error;
pub mod framework;
pub mod inventory_actor;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod search;
pub mod service;
