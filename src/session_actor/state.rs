//! Session state machine driven by the generic [`crate::framework::StoreActor`].
//!
//! ```text
//! Uninitialized ──initialize──▶ Loading ──▶ Authenticated
//!                                      └──▶ Anonymous
//! ```
//!
//! Every transition ends with `loading == false` and a fresh persisted snapshot, whichever
//! way it exits.

use crate::framework::StoreState;
use crate::model::{Credentials, Role, UserInfo};
use crate::ports::{AuthService, PersistedSession, SessionStorage};
use crate::session_actor::SessionError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Message reported when the authentication service cannot be reached.
pub const LOGIN_FAILED_MESSAGE: &str = "Login request failed";

/// The current user session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<UserInfo>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Authenticated,
    Anonymous,
}

impl Session {
    /// A settled, signed-out session.
    pub fn anonymous() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: false,
        }
    }

    /// A settled session for `user`.
    pub fn authenticated(user: UserInfo) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            loading: false,
        }
    }

    /// Restores the persisted fields. `loading` is left untouched.
    pub fn rehydrate(&mut self, snapshot: PersistedSession) {
        self.user = snapshot.user;
        self.is_authenticated = snapshot.is_authenticated && self.user.is_some();
    }

    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.is_authenticated {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn persisted(&self) -> PersistedSession {
        PersistedSession {
            user: self.user.clone(),
            is_authenticated: self.is_authenticated,
        }
    }

    fn sign_in(&mut self, user: UserInfo) {
        self.user = Some(user);
        self.is_authenticated = true;
    }

    fn sign_out(&mut self) {
        self.user = None;
        self.is_authenticated = false;
    }
}

#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Restore the session from the persisted token.
    Initialize,
    Login(Credentials),
    /// Sign in as `user` without a credential check.
    QuickLogin(UserInfo),
    Logout,
    SwitchRole(Role),
}

impl SessionCommand {
    fn shows_loading(&self) -> bool {
        matches!(
            self,
            SessionCommand::Initialize | SessionCommand::Login(_) | SessionCommand::Logout
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Authenticated(UserInfo),
    Anonymous,
    /// Login refused, with a message fit for the user.
    Rejected(String),
}

/// Collaborators the session needs while handling commands.
#[derive(Clone)]
pub struct SessionContext {
    pub auth: Arc<dyn AuthService>,
    pub storage: SessionStorage,
}

impl SessionContext {
    pub fn new(auth: Arc<dyn AuthService>, storage: SessionStorage) -> Self {
        Self { auth, storage }
    }
}

/// Opaque token for a quick login: user id plus the current time in milliseconds.
pub fn quick_token(user: &UserInfo) -> String {
    format!(
        "quick_token_{}_{}",
        user.id,
        chrono::Utc::now().timestamp_millis()
    )
}

impl Session {
    async fn initialize(&mut self, ctx: &SessionContext) -> SessionOutcome {
        let Some(token) = ctx.storage.token() else {
            debug!("No stored token");
            self.sign_out();
            return SessionOutcome::Anonymous;
        };

        match ctx.auth.user_info(&token).await {
            Ok(Some(user)) => {
                info!(username = %user.username, role = %user.role, "Session restored");
                self.sign_in(user.clone());
                SessionOutcome::Authenticated(user)
            }
            Ok(None) => {
                info!("Stored token is no longer valid");
                self.discard_credentials(ctx);
                SessionOutcome::Anonymous
            }
            Err(e) => {
                warn!(error = %e, "User lookup failed");
                self.discard_credentials(ctx);
                SessionOutcome::Anonymous
            }
        }
    }

    async fn login(
        &mut self,
        credentials: Credentials,
        ctx: &SessionContext,
    ) -> Result<SessionOutcome, SessionError> {
        let response = match ctx.auth.login(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                warn!(username = %credentials.username, error = %e, "Login request failed");
                self.sign_out();
                return Ok(SessionOutcome::Rejected(LOGIN_FAILED_MESSAGE.to_string()));
            }
        };

        match response.data {
            Some(data) if response.success => {
                if let Err(e) = ctx.storage.save_credentials(&data.token, &data.user) {
                    // No earlier session's pair may outlive the sign-out.
                    self.discard_credentials(ctx);
                    return Err(e.into());
                }
                info!(username = %data.user.username, role = %data.user.role, "Logged in");
                self.sign_in(data.user.clone());
                Ok(SessionOutcome::Authenticated(data.user))
            }
            _ => {
                info!(username = %credentials.username, message = %response.message, "Login rejected");
                self.sign_out();
                Ok(SessionOutcome::Rejected(response.message))
            }
        }
    }

    fn quick_login(
        &mut self,
        user: UserInfo,
        ctx: &SessionContext,
    ) -> Result<SessionOutcome, SessionError> {
        let token = quick_token(&user);
        ctx.storage.save_credentials(&token, &user)?;
        info!(username = %user.username, role = %user.role, "Quick login");
        self.sign_in(user.clone());
        Ok(SessionOutcome::Authenticated(user))
    }

    async fn logout(&mut self, ctx: &SessionContext) -> SessionOutcome {
        match ctx.auth.logout().await {
            Ok(response) if response.success => debug!("Remote logout acknowledged"),
            Ok(response) => warn!(message = %response.message, "Remote logout refused"),
            Err(e) => warn!(error = %e, "Remote logout failed"),
        }
        self.discard_credentials(ctx);
        info!("Logged out");
        SessionOutcome::Anonymous
    }

    fn switch_role(
        &mut self,
        role: Role,
        ctx: &SessionContext,
    ) -> Result<SessionOutcome, SessionError> {
        let Some(user) = self.user.as_ref().filter(|_| self.is_authenticated) else {
            debug!(%role, "Role switch ignored while signed out");
            return Ok(SessionOutcome::Anonymous);
        };

        let updated = user.with_role(role);
        // The token is rewritten with the record so the pair never diverges.
        let token = ctx.storage.token().unwrap_or_else(|| quick_token(&updated));
        ctx.storage.save_credentials(&token, &updated)?;

        info!(username = %updated.username, %role, "Role switched");
        self.user = Some(updated.clone());
        Ok(SessionOutcome::Authenticated(updated))
    }

    fn discard_credentials(&mut self, ctx: &SessionContext) {
        if let Err(e) = ctx.storage.clear() {
            warn!(error = %e, "Failed to clear stored credentials");
        }
        self.sign_out();
    }

    fn settle(&mut self, ctx: &SessionContext) {
        self.loading = false;
        if let Err(e) = ctx.storage.save_snapshot(&self.persisted()) {
            warn!(error = %e, "Failed to persist session snapshot");
        }
    }
}

#[async_trait]
impl StoreState for Session {
    type Command = SessionCommand;
    type Outcome = SessionOutcome;
    type Context = SessionContext;
    type Error = SessionError;

    /// Rehydrates the persisted snapshot. The session stays loading until `Initialize`.
    async fn on_start(&mut self, ctx: &SessionContext) -> Result<(), SessionError> {
        if let Some(snapshot) = ctx.storage.load_snapshot() {
            debug!(is_authenticated = snapshot.is_authenticated, "Rehydrated session snapshot");
            self.rehydrate(snapshot);
        }
        Ok(())
    }

    fn on_begin(&mut self, command: &SessionCommand) {
        if command.shows_loading() {
            self.loading = true;
        }
    }

    async fn handle(
        &mut self,
        command: SessionCommand,
        ctx: &SessionContext,
    ) -> Result<SessionOutcome, SessionError> {
        let result = match command {
            SessionCommand::Initialize => Ok(self.initialize(ctx).await),
            SessionCommand::Login(credentials) => self.login(credentials, ctx).await,
            SessionCommand::QuickLogin(user) => self.quick_login(user, ctx),
            SessionCommand::Logout => Ok(self.logout(ctx).await),
            SessionCommand::SwitchRole(role) => self.switch_role(role, ctx),
        };
        self.settle(ctx);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_loading() {
        let session = Session::default();
        assert_eq!(session.phase(), SessionPhase::Loading);
        assert!(session.user.is_none());
        assert!(!session.is_authenticated);
    }

    #[test]
    fn test_rehydrate_keeps_loading() {
        let mut session = Session::default();
        session.rehydrate(PersistedSession {
            user: Some(UserInfo::new("1", "admin", Role::Admin)),
            is_authenticated: true,
        });
        assert!(session.loading);
        assert!(session.is_authenticated);
        assert_eq!(session.role(), Some(Role::Admin));
    }

    #[test]
    fn test_rehydrate_without_user_is_not_authenticated() {
        let mut session = Session::default();
        session.rehydrate(PersistedSession {
            user: None,
            is_authenticated: true,
        });
        assert!(!session.is_authenticated);
    }

    #[test]
    fn test_quick_token_carries_user_id() {
        let token = quick_token(&UserInfo::new("42", "x", Role::User));
        assert!(token.starts_with("quick_token_42_"));
        assert_eq!(token.split('_').nth(2), Some("42"));
    }
}
