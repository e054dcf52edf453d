//! # Actor Framework
//!
//! Resource-oriented actors on tokio. Each resource type (ingredient, menu item, order)
//! gets its own [`ResourceActor`] that owns the store and handles requests one at a time,
//! and a cloneable [`ResourceClient`] that other tasks use to talk to it.
//!
//! Three layers:
//!
//! 1. **Entity** ([`ActorEntity`]): the domain type and its hooks.
//! 2. **Runtime** ([`ResourceActor`]): the mailbox loop.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed request/response.
//!
//! Dependencies are injected late: an actor's `Context` is passed to `run()`, so the
//! order actor can hold an inventory client without either being built around the other.
//!
//! See [`mock`] for testing without running the dependencies.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::{ActorEntity, Store};
pub use error::FrameworkError;
pub use message::{EntityResponse, ResourceRequest, Response};
