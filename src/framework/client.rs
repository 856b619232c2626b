//! # Generic Client
//!
//! The client half of a store: sends commands over the mpsc channel and reads published
//! snapshots from the watch channel.

use crate::framework::error::FrameworkError;
use crate::framework::message::StoreRequest;
use crate::framework::state::StoreState;
use tokio::sync::{mpsc, oneshot, watch};

/// A type-safe client for interacting with a `StoreActor`.
///
/// * **Cloneable** – holds a sender and a watch receiver, both cheap to clone.
/// * **Snapshots** – [`snapshot`](Self::snapshot) never waits; it returns the last state
///   the actor published.
pub struct StoreClient<S: StoreState> {
    sender: mpsc::Sender<StoreRequest<S>>,
    watcher: watch::Receiver<S>,
}

impl<S: StoreState> Clone for StoreClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            watcher: self.watcher.clone(),
        }
    }
}

impl<S: StoreState> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>, watcher: watch::Receiver<S>) -> Self {
        Self { sender, watcher }
    }

    pub async fn dispatch(&self, command: S::Command) -> Result<S::Outcome, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Dispatch {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn settled(&self) -> Result<S, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Settled { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// The last published state.
    pub fn snapshot(&self) -> S {
        self.watcher.borrow().clone()
    }

    /// A fresh receiver for observing published states.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.watcher.clone()
    }
}
