//! # Menu Client
//!
//! High-level API for the menu store.

use crate::framework::{downcast_state_error, FrameworkError, StoreClient, StoreHandle};
use crate::menu_actor::{MenuCommand, MenuError, MenuState};
use crate::model::Role;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: StoreClient<MenuState>,
}

impl MenuClient {
    pub fn new(inner: StoreClient<MenuState>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreHandle<MenuState> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &StoreClient<MenuState> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        downcast_state_error(e)
    }
}

impl MenuClient {
    async fn send(&self, command: MenuCommand) -> Result<MenuState, MenuError> {
        self.inner.dispatch(command).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn generate(
        &self,
        role: Option<Role>,
        is_authenticated: bool,
    ) -> Result<MenuState, MenuError> {
        debug!("Sending request");
        self.send(MenuCommand::Generate {
            role,
            is_authenticated,
        })
        .await
    }

    /// Updates selected and open keys for `pathname`.
    #[instrument(skip(self))]
    pub async fn sync_path(&self, pathname: &str) -> Result<MenuState, MenuError> {
        debug!("Sending request");
        self.send(MenuCommand::SyncPath(pathname.to_string())).await
    }

    #[instrument(skip(self))]
    pub async fn set_collapsed(&self, collapsed: bool) -> Result<MenuState, MenuError> {
        debug!("Sending request");
        self.send(MenuCommand::SetCollapsed(collapsed)).await
    }

    #[instrument(skip(self))]
    pub async fn toggle_collapsed(&self) -> Result<MenuState, MenuError> {
        debug!("Sending request");
        self.send(MenuCommand::ToggleCollapsed).await
    }
}
