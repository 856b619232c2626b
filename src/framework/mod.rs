//! Generic store framework for client-side state containers.
//!
//! # Main Components
//!
//! - [`StoreState`] - Trait that state containers implement to be driven by an actor
//! - [`StoreActor`] - Generic actor that owns a state value and applies commands in order
//! - [`StoreClient`] - Cloneable handle that dispatches commands and reads snapshots
//! - [`StoreHandle`] - Trait for store-specific client wrappers
//! - [`FrameworkError`] - Errors raised by the plumbing itself

pub mod actor;
pub mod client;
pub mod error;
pub mod handle;
pub mod message;
pub mod state;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::FrameworkError;
pub use handle::{downcast_state_error, StoreHandle};
pub use message::{Response, StoreRequest};
pub use state::StoreState;
