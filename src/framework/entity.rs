//! # ActorEntity Trait
//!
//! The contract every stored resource (ingredient, menu item, order) implements so the
//! generic [`ResourceActor`](crate::framework::ResourceActor) can own it. Associated types
//! pin down the id, the DTOs, the per-entity actions and the collection-wide commands;
//! the async hooks carry the business rules.
//!
//! # Per-entity vs collection-wide
//! - [`ActorEntity::handle_action`] runs against one entity, looked up by id.
//! - [`ActorEntity::handle_command`] runs against the whole store. It is the place for
//!   anything that must touch several entities in one step (allocating stock for a
//!   whole recipe) or read across all of them (period reports).
//!
//! Both run inside the actor task, so nothing else touches the store while they execute.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

/// The owned collection of a [`ResourceActor`](crate::framework::ResourceActor).
///
/// A `BTreeMap` keeps listings and reports in id order.
pub type Store<T> = BTreeMap<<T as ActorEntity>::Id, T>;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can call other actors. The `Context` type is
/// injected into every hook when the actor starts (`run(context)`), which lets the
/// order store talk to the inventory store without either one owning the other.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier. Built from the actor's `u32` counter.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Operations on a single entity beyond CRUD.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Operations over the whole collection.
    type Command: Send + Sync + Debug;

    /// The result type returned by commands.
    type CommandResult: Send + Sync + Debug;

    /// Dependencies injected at `run()`. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum for the whole entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its new id and the payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Runs after construction and before the entity is inserted.
    /// An error here means nothing is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update. The actor calls this on a copy and keeps the copy only on `Ok`.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before the entity is removed. An error keeps the entity.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action / Command Handlers (Async) ---

    /// Handle an entity-specific action. Same copy-then-commit rule as `on_update`.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Handle a collection-wide command.
    ///
    /// Implementations that mutate must validate everything before changing anything:
    /// the store is handed over as is, there is no copy to roll back to.
    async fn handle_command(
        store: &mut Store<Self>,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Self::CommandResult, Self::Error>;
}
