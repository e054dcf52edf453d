//! # Framework Errors
//!
//! Transport failures of the actor plumbing, plus a typed slot for the entity's own error
//! so callers can match on domain variants instead of parsing strings.

/// Errors that can occur when talking to a `ResourceActor`.
///
/// `E` is the entity's error type ([`ActorEntity::Error`](crate::framework::ActorEntity::Error)).
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Entity(E),
}

impl<E> FrameworkError<E> {
    /// True when the actor could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ActorClosed | Self::ActorDropped)
    }
}
