//! # StoreState Trait
//!
//! The contract every client-side state container (session, menu, ...) implements to be
//! driven by the generic [`StoreActor`](crate::framework::StoreActor).
//!
//! A store is a single value (`Self`) that is mutated only through typed commands. The actor
//! owns the value, applies commands one at a time and publishes snapshots to observers.
//!
//! # Hooks
//! - [`StoreState::on_start`] runs once before the first command.
//! - [`StoreState::on_begin`] runs synchronously when a command is received. Whatever it
//!   changes is published *before* the async part starts (e.g. raising a `loading` flag).
//! - [`StoreState::handle`] applies the command. Its intermediate mutations are never
//!   published; observers only see the state once the command has settled.

use async_trait::async_trait;
use std::fmt::Debug;

/// Trait that any state container must implement to be managed by a `StoreActor`.
///
/// # Context
/// Like the entity hooks of a resource actor, every hook receives the `Context` injected
/// through [`StoreActor::run`](crate::framework::StoreActor::run). This is where the
/// collaborators live (authentication service, persisted storage, route table, ...), so the
/// state value itself stays plain data that can be cloned and compared.
#[async_trait]
pub trait StoreState: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// The commands this store accepts.
    type Command: Send + Sync + Debug;

    /// What a settled command reports back to the caller.
    type Outcome: Send + Sync + Debug;

    /// Dependencies injected at run time. Use `()` if none are needed.
    type Context: Send + Sync;

    /// The error type for this store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once when the actor starts, before any command is processed.
    async fn on_start(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Synchronous pre-step for a command. Changes made here are published immediately.
    fn on_begin(&mut self, _command: &Self::Command) {}

    /// Apply a command.
    async fn handle(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Self::Outcome, Self::Error>;
}
