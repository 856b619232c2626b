//! # Session Client
//!
//! High-level API for the session store. Wraps a `StoreClient<Session>` and exposes one
//! method per transition.

use crate::framework::{downcast_state_error, FrameworkError, StoreClient, StoreHandle};
use crate::model::{Credentials, Role, UserInfo};
use crate::session_actor::{Session, SessionCommand, SessionError, SessionOutcome};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the session actor.
#[derive(Clone)]
pub struct SessionClient {
    inner: StoreClient<Session>,
}

impl SessionClient {
    pub fn new(inner: StoreClient<Session>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreHandle<Session> for SessionClient {
    type Error = SessionError;

    fn inner(&self) -> &StoreClient<Session> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        downcast_state_error(e)
    }
}

impl SessionClient {
    async fn send(&self, command: SessionCommand) -> Result<SessionOutcome, SessionError> {
        self.inner.dispatch(command).await.map_err(Self::map_error)
    }

    /// Restores the session from the stored token. Lookup failures settle as anonymous.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<SessionOutcome, SessionError> {
        debug!("Sending request");
        self.send(SessionCommand::Initialize).await
    }

    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: Credentials) -> Result<SessionOutcome, SessionError> {
        debug!("Sending request");
        self.send(SessionCommand::Login(credentials)).await
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn quick_login(&self, user: UserInfo) -> Result<SessionOutcome, SessionError> {
        debug!("Sending request");
        self.send(SessionCommand::QuickLogin(user)).await
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<SessionOutcome, SessionError> {
        debug!("Sending request");
        self.send(SessionCommand::Logout).await
    }

    #[instrument(skip(self))]
    pub async fn switch_role(&self, role: Role) -> Result<SessionOutcome, SessionError> {
        debug!("Sending request");
        self.send(SessionCommand::SwitchRole(role)).await
    }
}
