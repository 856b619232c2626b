//! # StoreHandle Trait
//!
//! Common interface for store-specific clients: gives them `snapshot`, `subscribe` and
//! `settled` on top of a generic [`StoreClient`], with framework errors mapped into the
//! store's own error type.

use crate::framework::{FrameworkError, StoreClient, StoreState};
use async_trait::async_trait;
use tokio::sync::watch;

#[async_trait]
pub trait StoreHandle<S: StoreState>: Send + Sync {
    /// The store-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<S>;

    /// Map framework errors to the store's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Last published state. Never waits.
    fn snapshot(&self) -> S {
        self.inner().snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<S> {
        self.inner().subscribe()
    }

    /// State after every command queued before this call has been applied.
    #[tracing::instrument(skip(self))]
    async fn settled(&self) -> Result<S, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().settled().await.map_err(Self::map_error)
    }
}

/// Recovers a store's own error from a boxed [`FrameworkError::StateError`].
///
/// Plumbing errors, or state errors of another type, are turned into their message.
pub fn downcast_state_error<E>(e: FrameworkError) -> E
where
    E: std::error::Error + From<String> + 'static,
{
    match e {
        FrameworkError::StateError(inner) => match inner.downcast::<E>() {
            Ok(typed) => *typed,
            Err(other) => E::from(other.to_string()),
        },
        other => E::from(other.to_string()),
    }
}
