//! Wiring: configuration, tracing and the composition root that runs both stores.

pub mod config;
pub mod console;
pub mod tracing;

pub use self::config::*;
pub use self::console::*;
pub use self::tracing::setup_tracing;
