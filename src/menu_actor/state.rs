//! Menu view state driven by the generic [`crate::framework::StoreActor`].
//!
//! `open_keys` is empty whenever `collapsed` is set; every command that touches either
//! field goes through [`MenuState::refresh_open_keys`].

use crate::framework::StoreState;
use crate::menu::{open_keys, project, project_config, selected_keys};
use crate::menu_actor::MenuError;
use crate::model::{MenuConfig, MenuEntry, Role, RouteDescriptor};
use async_trait::async_trait;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuState {
    pub entries: Vec<MenuEntry>,
    pub selected_keys: BTreeSet<String>,
    pub open_keys: BTreeSet<String>,
    pub collapsed: bool,
    pub loading: bool,
    /// Path the keys were last derived from. Empty until the first sync.
    pub pathname: String,
    /// Inputs of the last generation.
    pub role: Option<Role>,
    pub is_authenticated: bool,
    /// False until entries have been projected once.
    pub generated: bool,
}

impl MenuState {
    /// Whether the entries are settled and were projected for exactly these inputs.
    pub fn is_current_for(&self, role: Option<Role>, is_authenticated: bool) -> bool {
        self.generated
            && !self.loading
            && self.role == role
            && self.is_authenticated == is_authenticated
    }

    fn refresh_open_keys(&mut self) {
        self.open_keys = if self.collapsed || self.pathname.is_empty() {
            BTreeSet::new()
        } else {
            open_keys(&self.pathname)
        };
    }

    fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
        self.refresh_open_keys();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuCommand {
    /// Recompute the entries for a role and authentication state.
    Generate {
        role: Option<Role>,
        is_authenticated: bool,
    },
    /// Derive selected and open keys from a new path.
    SyncPath(String),
    SetCollapsed(bool),
    ToggleCollapsed,
}

/// Where menu entries are projected from.
#[derive(Debug, Clone)]
pub enum MenuSource {
    /// Nested route tree, projected with [`project`].
    Routes(Vec<RouteDescriptor>),
    /// Flat configuration rows, projected with [`project_config`].
    Config(Vec<MenuConfig>),
}

impl MenuSource {
    pub fn project(&self, role: Option<Role>, is_authenticated: bool) -> Vec<MenuEntry> {
        match self {
            MenuSource::Routes(routes) => project(routes, role, is_authenticated),
            MenuSource::Config(configs) => project_config(configs, role, is_authenticated),
        }
    }
}

#[async_trait]
impl StoreState for MenuState {
    type Command = MenuCommand;
    /// The view after the command settled.
    type Outcome = MenuState;
    type Context = MenuSource;
    type Error = MenuError;

    fn on_begin(&mut self, command: &MenuCommand) {
        if matches!(command, MenuCommand::Generate { .. }) {
            self.loading = true;
        }
    }

    async fn handle(
        &mut self,
        command: MenuCommand,
        source: &MenuSource,
    ) -> Result<MenuState, MenuError> {
        match command {
            MenuCommand::Generate {
                role,
                is_authenticated,
            } => {
                self.entries = source.project(role, is_authenticated);
                self.role = role;
                self.is_authenticated = is_authenticated;
                self.loading = false;
                self.generated = true;
                debug!(?role, is_authenticated, entries = self.entries.len(), "Menu generated");
            }
            MenuCommand::SyncPath(pathname) => {
                if !pathname.starts_with('/') {
                    return Err(MenuError::InvalidPath(pathname));
                }
                self.selected_keys = selected_keys(&pathname);
                self.pathname = pathname;
                self.refresh_open_keys();
            }
            MenuCommand::SetCollapsed(collapsed) => self.set_collapsed(collapsed),
            MenuCommand::ToggleCollapsed => self.set_collapsed(!self.collapsed),
        }
        Ok(self.clone())
    }
}
