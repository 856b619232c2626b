//! # Framework Errors
//!
//! Errors raised by the store plumbing itself, as opposed to the domain errors each store
//! defines for its own commands.

/// Errors that can occur within the store framework.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("State error: {0}")]
    StateError(Box<dyn std::error::Error + Send + Sync>),
}
