//! Session store: who is signed in, and the transitions that change it.

pub mod error;
pub mod state;

pub use error::*;
pub use state::*;

use crate::clients::SessionClient;
use crate::framework::StoreActor;

/// Creates a new session actor and its client. The session starts out loading.
pub fn new(buffer_size: usize) -> (StoreActor<Session>, SessionClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size, Session::default());
    let client = SessionClient::new(generic_client);
    (actor, client)
}
