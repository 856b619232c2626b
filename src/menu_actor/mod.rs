//! Menu store: sidebar entries and their selection, expansion and collapse state.

pub mod error;
pub mod state;

pub use error::*;
pub use state::*;

use crate::clients::MenuClient;
use crate::framework::StoreActor;

/// Creates a new menu actor and its client.
pub fn new(buffer_size: usize) -> (StoreActor<MenuState>, MenuClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size, MenuState::default());
    let client = MenuClient::new(generic_client);
    (actor, client)
}
