//! Error types for the session store.

use crate::ports::StorageError;
use thiserror::Error;

/// Errors that can surface from session commands.
///
/// Authentication failures are not errors: they settle the session as anonymous and are
/// reported through [`crate::session_actor::SessionOutcome`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The token and user record could not be persisted.
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// An error occurred while communicating with the store actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for SessionError {
    fn from(msg: String) -> Self {
        SessionError::ActorCommunicationError(msg)
    }
}
