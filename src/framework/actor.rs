//! # Generic Store Actor
//!
//! `StoreActor<S>` is the server half of a state container. It owns the state value and the
//! receiving end of the command channel, processes commands sequentially and publishes
//! snapshots on a `watch` channel.
//!
//! ## Publication points
//!
//! For every `Dispatch` the actor:
//! 1. calls [`StoreState::on_begin`] and publishes if the state changed,
//! 2. awaits [`StoreState::handle`],
//! 3. publishes the settled state, whether the command succeeded or failed.
//!
//! Nothing in between is visible to observers, so a transition that touches several fields
//! across an `.await` is seen as a single step.

use crate::framework::client::StoreClient;
use crate::framework::error::FrameworkError;
use crate::framework::message::StoreRequest;
use crate::framework::state::StoreState;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The generic actor that owns one state container.
///
/// **Concurrency Model**:
/// Commands are applied one at a time inside the actor task, so the state needs no lock.
/// Clients never touch the state directly; they send commands and read published snapshots.
pub struct StoreActor<S: StoreState> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    publisher: watch::Sender<S>,
    state: S,
}

impl<S: StoreState> StoreActor<S> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the command channel. When full, client calls wait.
    /// * `initial` - The state observers see before the actor processes anything.
    pub fn new(buffer_size: usize, initial: S) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, watcher) = watch::channel(initial.clone());
        let actor = Self {
            receiver,
            publisher,
            state: initial,
        };
        let client = StoreClient::new(sender, watcher);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every hook, so collaborators can be created after the actor
    /// and its client but before the loop starts.
    pub async fn run(mut self, context: S::Context) {
        let store_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(store_type, "Store started");

        if let Err(e) = self.state.on_start(&context).await {
            warn!(store_type, error = %e, "on_start failed");
        }
        self.publish();

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Dispatch {
                    command,
                    respond_to,
                } => {
                    debug!(store_type, ?command, "Dispatch");
                    self.state.on_begin(&command);
                    self.publish();

                    let result = self
                        .state
                        .handle(command, &context)
                        .await
                        .map_err(|e| FrameworkError::StateError(Box::new(e)));
                    self.publish();

                    match &result {
                        Ok(outcome) => debug!(store_type, ?outcome, "Settled"),
                        Err(e) => warn!(store_type, error = %e, "Command failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Settled { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
            }
        }

        info!(store_type, "Shutdown");
    }

    /// Publishes the current state if it differs from the last published snapshot.
    fn publish(&self) {
        let state = &self.state;
        self.publisher.send_if_modified(|current| {
            if current == state {
                false
            } else {
                *current = state.clone();
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq, Default)]
    struct Counter {
        value: u32,
        busy: bool,
    }

    #[derive(Debug)]
    enum CounterCommand {
        Add(u32),
        Fail,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("counter refused")]
    struct CounterError;

    #[async_trait]
    impl StoreState for Counter {
        type Command = CounterCommand;
        type Outcome = u32;
        type Context = ();
        type Error = CounterError;

        fn on_begin(&mut self, _command: &CounterCommand) {
            self.busy = true;
        }

        async fn handle(&mut self, command: CounterCommand, _ctx: &()) -> Result<u32, CounterError> {
            self.busy = false;
            match command {
                CounterCommand::Add(n) => {
                    self.value += n;
                    Ok(self.value)
                }
                CounterCommand::Fail => Err(CounterError),
            }
        }
    }

    #[tokio::test]
    async fn test_dispatch_publishes_settled_state() {
        let (actor, client) = StoreActor::new(8, Counter::default());
        let handle = tokio::spawn(actor.run(()));

        assert_eq!(client.dispatch(CounterCommand::Add(2)).await.unwrap(), 2);
        assert_eq!(client.dispatch(CounterCommand::Add(3)).await.unwrap(), 5);

        let settled = client.settled().await.unwrap();
        assert_eq!(settled.value, 5);
        assert!(!settled.busy);
        assert_eq!(client.snapshot(), settled);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_command_still_publishes() {
        let (actor, client) = StoreActor::new(8, Counter::default());
        tokio::spawn(actor.run(()));

        let result = client.dispatch(CounterCommand::Fail).await;
        assert!(matches!(result, Err(FrameworkError::StateError(_))));
        assert!(!client.snapshot().busy);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_error() {
        let (actor, client) = StoreActor::new(8, Counter::default());
        drop(actor);

        let result = client.dispatch(CounterCommand::Add(1)).await;
        assert!(matches!(result, Err(FrameworkError::ActorClosed)));
    }
}
