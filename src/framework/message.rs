//! # Generic Messages
//!
//! Requests sent from a `ResourceClient` to its `ResourceActor`.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot response channel used by actors.
pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

/// Shorthand for the response channel of entity `T`.
pub type EntityResponse<T, R> = Response<R, <T as ActorEntity>::Error>;

/// Internal message type sent to the actor.
///
/// The CRUD variants apply to any stored resource. `Action` targets one entity with a
/// resource-specific operation, `Command` targets the whole collection.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: EntityResponse<T, T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: EntityResponse<T, Option<T>>,
    },
    List {
        respond_to: EntityResponse<T, Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: EntityResponse<T, T>,
    },
    Delete {
        id: T::Id,
        respond_to: EntityResponse<T, ()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: EntityResponse<T, T::ActionResult>,
    },
    Command {
        command: T::Command,
        respond_to: EntityResponse<T, T::CommandResult>,
    },
}
