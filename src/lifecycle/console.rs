use crate::api::MockApi;
use crate::clients::{MenuClient, SessionClient};
use crate::framework::StoreHandle;
use crate::guard::{AuthGuard, GuardDecision};
use crate::lifecycle::{ConfigError, ConsoleConfig};
use crate::menu_actor::{MenuError, MenuSource, MenuState};
use crate::model::{Credentials, Role, UserInfo};
use crate::ports::{
    AuthService, JsonFileStore, KeyValueStore, MemoryStore, SessionStorage, StorageError,
};
use crate::routes::app_routes;
use crate::session_actor::{Session, SessionContext, SessionError, SessionOutcome};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Menu store stopped")]
    MenuUnavailable,
    #[error("Task failed: {0}")]
    TaskFailed(String),
}

/// Result of resolving a navigation request.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub requested: String,
    pub decision: GuardDecision,
    /// The settled menu view after the navigation.
    pub menu: MenuState,
}

impl Navigation {
    /// Path the user ends up on. `None` while the session is loading.
    pub fn location(&self) -> Option<&str> {
        self.decision.target(&self.requested)
    }
}

/// The composition root: owns both stores and keeps the menu in step with the session.
///
/// # Architecture
///
/// - **Session actor**: authentication state and persistence
/// - **Menu actor**: sidebar entries, selection and collapse state
/// - **Session follower**: a task regenerating the menu whenever the session's role or
///   authentication changes
///
/// ```ignore
/// let console = AdminConsole::start(&ConsoleConfig::default())?;
/// let landing = console.boot("/home").await?;
/// console.login(Credentials::new("admin", "admin123")).await?;
/// console.shutdown().await?;
/// ```
pub struct AdminConsole {
    pub session: SessionClient,
    pub menu: MenuClient,
    guard: AuthGuard,
    handles: Vec<JoinHandle<()>>,
}

impl AdminConsole {
    /// Starts the console with the seeded mock API and the app route table.
    pub fn start(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        let auth: Arc<dyn AuthService> = Arc::new(MockApi::with_latency(config.latency.clone()));
        let store: Arc<dyn KeyValueStore> = match &config.storage_path {
            Some(path) => Arc::new(JsonFileStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        };
        Self::new(config, auth, store, MenuSource::Routes(app_routes()))
    }

    /// Spawns both actors and the session follower. Must be called inside a Tokio runtime.
    pub fn new(
        config: &ConsoleConfig,
        auth: Arc<dyn AuthService>,
        store: Arc<dyn KeyValueStore>,
        source: MenuSource,
    ) -> Result<Self, ConsoleError> {
        config.validate()?;

        // 1. Create actors
        let (session_actor, session) = crate::session_actor::new(config.buffer_size);
        let (menu_actor, menu) = crate::menu_actor::new(config.buffer_size);

        // 2. Start actors with injected context
        let storage = SessionStorage::new(store, config.storage.clone());
        let session_handle = tokio::spawn(session_actor.run(SessionContext::new(auth, storage)));
        let menu_handle = tokio::spawn(menu_actor.run(source));

        // 3. Keep the menu following the session
        let follower_handle = tokio::spawn(follow_session(session.subscribe(), menu.clone()));

        info!("Console started");
        Ok(Self {
            session,
            menu,
            guard: config.guard(),
            // Shutdown order: the follower stops once the session actor is gone, and the
            // menu actor once the follower has released its client.
            handles: vec![session_handle, follower_handle, menu_handle],
        })
    }

    pub fn guard(&self) -> &AuthGuard {
        &self.guard
    }

    /// Restores the session, then resolves the first navigation.
    pub async fn boot(&self, path: &str) -> Result<Navigation, ConsoleError> {
        let outcome = self.session.initialize().await?;
        debug!(?outcome, "Session initialized");
        self.navigate(path).await
    }

    /// Runs the guard for `path` and moves the menu selection to wherever the user lands.
    pub async fn navigate(&self, path: &str) -> Result<Navigation, ConsoleError> {
        let session = self.session.settled().await?;
        let decision = self.guard.decide(&session, path);

        match &decision {
            GuardDecision::Redirect { to, from } => {
                info!(requested = path, to = %to, from = ?from, "Redirected")
            }
            GuardDecision::ShowLoading => debug!(requested = path, "Session still loading"),
            GuardDecision::Allow => debug!(requested = path, "Allowed"),
        }

        if let Some(target) = decision.target(path) {
            self.menu.sync_path(target).await?;
        }
        let menu = self.current_menu().await?;

        Ok(Navigation {
            requested: path.to_string(),
            decision,
            menu,
        })
    }

    /// A menu click is a navigation request for the entry's key.
    pub async fn click(&self, key: &str) -> Result<Navigation, ConsoleError> {
        self.navigate(key).await
    }

    pub async fn toggle_sidebar(&self) -> Result<MenuState, ConsoleError> {
        Ok(self.menu.toggle_collapsed().await?)
    }

    pub async fn login(&self, credentials: Credentials) -> Result<SessionOutcome, ConsoleError> {
        let outcome = self.session.login(credentials).await;
        self.settle_menu().await?;
        Ok(outcome?)
    }

    pub async fn quick_login(&self, user: UserInfo) -> Result<SessionOutcome, ConsoleError> {
        let outcome = self.session.quick_login(user).await;
        self.settle_menu().await?;
        Ok(outcome?)
    }

    pub async fn logout(&self) -> Result<SessionOutcome, ConsoleError> {
        let outcome = self.session.logout().await;
        self.settle_menu().await?;
        Ok(outcome?)
    }

    pub async fn switch_role(&self, role: Role) -> Result<SessionOutcome, ConsoleError> {
        let outcome = self.session.switch_role(role).await;
        self.settle_menu().await?;
        Ok(outcome?)
    }

    /// The menu once it reflects the session as settled by every queued command.
    pub async fn settle_menu(&self) -> Result<MenuState, ConsoleError> {
        self.session.settled().await?;
        self.current_menu().await
    }

    /// Waits until the menu was generated for the session's latest published inputs.
    ///
    /// The condition reads the session at every menu change, so a session that moves on
    /// while waiting is followed rather than waited for.
    async fn current_menu(&self) -> Result<MenuState, ConsoleError> {
        let sessions = self.session.subscribe();
        let mut menus = self.menu.subscribe();
        let state = menus
            .wait_for(|m| {
                let session = sessions.borrow();
                session.loading || m.is_current_for(session.role(), session.is_authenticated)
            })
            .await
            .map_err(|_| ConsoleError::MenuUnavailable)?
            .clone();
        Ok(state)
    }

    /// Gracefully shuts down the console.
    ///
    /// Dropping the clients closes both command channels; each actor then drains and exits.
    pub async fn shutdown(self) -> Result<(), ConsoleError> {
        info!("Shutting down console...");
        drop(self.session);
        drop(self.menu);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Console task failed: {:?}", e);
                return Err(ConsoleError::TaskFailed(e.to_string()));
            }
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}

/// Regenerates the menu whenever the settled session's role or authentication changes.
async fn follow_session(mut sessions: watch::Receiver<Session>, menu: MenuClient) {
    let mut last: Option<(Option<Role>, bool)> = None;

    loop {
        let inputs = {
            let session = sessions.borrow_and_update();
            (!session.loading).then(|| (session.role(), session.is_authenticated))
        };

        if let Some((role, is_authenticated)) = inputs {
            if last != inputs {
                if let Err(e) = menu.generate(role, is_authenticated).await {
                    warn!(error = %e, "Menu regeneration failed");
                }
                last = inputs;
            }
        }

        if sessions.changed().await.is_err() {
            break;
        }
    }
    debug!("Session follower stopped");
}
