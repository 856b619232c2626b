//! Navigation guard: decides whether a path may be shown for the current session.

use crate::routes::{LOGIN_PATH, ROOT_PATH};
use crate::session_actor::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still settling; show a loading indicator.
    ShowLoading,
    /// Navigate to `to`. `from` is the originally requested path, kept so the login page
    /// can send the user back after signing in.
    Redirect { to: String, from: Option<String> },
    Allow,
}

impl GuardDecision {
    /// The path the user ends up on, if the decision settles on one.
    pub fn target<'a>(&'a self, requested: &'a str) -> Option<&'a str> {
        match self {
            GuardDecision::ShowLoading => None,
            GuardDecision::Redirect { to, .. } => Some(to.as_str()),
            GuardDecision::Allow => Some(requested),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthGuard {
    login_path: String,
    home_path: String,
    public_paths: Vec<String>,
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self::new(LOGIN_PATH, ROOT_PATH, [LOGIN_PATH, "/test"])
    }
}

impl AuthGuard {
    /// The login path is always public, whether or not it is listed.
    pub fn new<I, P>(login_path: &str, home_path: &str, public_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut public_paths: Vec<String> = public_paths.into_iter().map(Into::into).collect();
        if !public_paths.iter().any(|p| p == login_path) {
            public_paths.push(login_path.to_string());
        }
        Self {
            login_path: login_path.to_string(),
            home_path: home_path.to_string(),
            public_paths,
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
    }

    pub fn decide(&self, session: &Session, path: &str) -> GuardDecision {
        if session.loading {
            return GuardDecision::ShowLoading;
        }

        if !session.is_authenticated && !self.is_public(path) {
            return GuardDecision::Redirect {
                to: self.login_path.clone(),
                from: Some(path.to_string()),
            };
        }

        if session.is_authenticated && path == self.login_path {
            return GuardDecision::Redirect {
                to: self.home_path.clone(),
                from: None,
            };
        }

        GuardDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, UserInfo};

    fn signed_in() -> Session {
        Session::authenticated(UserInfo::new("1", "admin", Role::Admin))
    }

    #[test]
    fn test_loading_shows_loading() {
        let guard = AuthGuard::default();
        assert_eq!(guard.decide(&Session::default(), "/home"), GuardDecision::ShowLoading);
        assert_eq!(guard.decide(&Session::default(), "/login"), GuardDecision::ShowLoading);
    }

    #[test]
    fn test_anonymous_is_sent_to_login_with_origin() {
        let decision = AuthGuard::default().decide(&Session::anonymous(), "/home");
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                to: "/login".into(),
                from: Some("/home".into()),
            }
        );
        assert_eq!(decision.target("/home"), Some("/login"));
    }

    #[test]
    fn test_anonymous_may_open_public_paths() {
        let guard = AuthGuard::default();
        assert_eq!(guard.decide(&Session::anonymous(), "/login"), GuardDecision::Allow);
        assert_eq!(guard.decide(&Session::anonymous(), "/test"), GuardDecision::Allow);
    }

    #[test]
    fn test_authenticated_login_redirects_home() {
        let decision = AuthGuard::default().decide(&signed_in(), "/login");
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                to: "/".into(),
                from: None,
            }
        );
    }

    #[test]
    fn test_authenticated_is_allowed() {
        let guard = AuthGuard::default();
        assert_eq!(guard.decide(&signed_in(), "/home"), GuardDecision::Allow);
        assert_eq!(guard.decide(&signed_in(), "/test"), GuardDecision::Allow);
    }

    #[test]
    fn test_login_path_always_public() {
        let guard = AuthGuard::new("/signin", "/", Vec::<String>::new());
        assert!(guard.is_public("/signin"));
        assert_eq!(guard.decide(&Session::anonymous(), "/signin"), GuardDecision::Allow);
    }
}
