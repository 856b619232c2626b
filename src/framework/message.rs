//! # Store Messages
//!
//! The message types exchanged between a `StoreClient` and its `StoreActor`.

use crate::framework::error::FrameworkError;
use crate::framework::state::StoreState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by store actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// - **Dispatch**: apply a [`StoreState::Command`] and report its outcome.
/// - **Settled**: read the state after every previously queued message has been applied.
///   Unlike the watch snapshot, this read is ordered with respect to pending commands.
#[derive(Debug)]
pub enum StoreRequest<S: StoreState> {
    Dispatch {
        command: S::Command,
        respond_to: Response<S::Outcome>,
    },
    Settled {
        respond_to: Response<S>,
    },
}
