//! Type-safe wrappers around [`StoreClient`](crate::framework::StoreClient).

pub mod menu_client;
pub mod session_client;

pub use menu_client::*;
pub use session_client::*;
