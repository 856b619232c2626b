//! # Test Doubles
//!
//! Stand-ins for the collaborators so the stores can be tested without the seeded API.
//!
//! | Double | Replaces | Controls |
//! |--------|----------|----------|
//! | [`MockAuthService`] | [`AuthService`] | responses, latency, transport failures |
//! | [`MockStore`] | [`KeyValueStore`] | write failures per key |
//!
//! ```rust
//! use admin_console::mock::MockAuthService;
//! use admin_console::model::{Credentials, Role, UserInfo};
//! use admin_console::ports::{ApiError, AuthService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockAuthService::new();
//!     mock.expect_login()
//!         .return_accepted(UserInfo::new("1", "admin", Role::Admin), "tok");
//!     mock.expect_user_info().return_err(ApiError::Unavailable);
//!
//!     let response = mock.login(&Credentials::new("admin", "pw")).await.unwrap();
//!     assert!(response.success);
//!     assert!(mock.user_info("tok").await.is_err());
//!
//!     mock.verify(); // Ensures all expectations were met
//! }
//! ```

use crate::model::{Credentials, UserInfo};
use crate::ports::{
    ApiError, AuthService, KeyValueStore, LoginResponse, LogoutResponse, MemoryStore,
    StorageError,
};
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// AUTH SERVICE
// =============================================================================

enum Expectation {
    Login {
        username: Option<String>,
        response: Result<LoginResponse, ApiError>,
        delay: Duration,
    },
    UserInfo {
        token: Option<String>,
        response: Result<Option<UserInfo>, ApiError>,
        delay: Duration,
    },
    Logout {
        response: Result<LogoutResponse, ApiError>,
        delay: Duration,
    },
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// An [`AuthService`] answering from a queue of expectations, in order.
///
/// Cloning shares the queue, so a test can hand one clone to the session and keep another
/// to call [`verify`](Self::verify).
#[derive(Clone, Default)]
pub struct MockAuthService {
    expectations: Expectations,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAuthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_login(&self) -> LoginExpectationBuilder {
        LoginExpectationBuilder {
            username: None,
            delay: Duration::ZERO,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_user_info(&self) -> UserInfoExpectationBuilder {
        UserInfoExpectationBuilder {
            token: None,
            delay: Duration::ZERO,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_logout(&self) -> LogoutExpectationBuilder {
        LogoutExpectationBuilder {
            delay: Duration::ZERO,
            expectations: self.expectations.clone(),
        }
    }

    /// Names of the calls received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn next(&self, call: &str) -> Option<Expectation> {
        self.calls.lock().unwrap().push(call.to_string());
        self.expectations.lock().unwrap().pop_front()
    }
}

async fn wait(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        match self.next("login") {
            Some(Expectation::Login {
                username,
                response,
                delay,
            }) => {
                if let Some(expected) = username {
                    assert_eq!(expected, credentials.username, "unexpected login username");
                }
                wait(delay).await;
                response
            }
            _ => panic!("Unexpected login or expectation mismatch"),
        }
    }

    async fn user_info(&self, token: &str) -> Result<Option<UserInfo>, ApiError> {
        match self.next("user_info") {
            Some(Expectation::UserInfo {
                token: expected,
                response,
                delay,
            }) => {
                if let Some(expected) = expected {
                    assert_eq!(expected, token, "unexpected lookup token");
                }
                wait(delay).await;
                response
            }
            _ => panic!("Unexpected user_info or expectation mismatch"),
        }
    }

    async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        match self.next("logout") {
            Some(Expectation::Logout { response, delay }) => {
                wait(delay).await;
                response
            }
            _ => panic!("Unexpected logout or expectation mismatch"),
        }
    }
}

/// Builder for `login` expectations.
pub struct LoginExpectationBuilder {
    username: Option<String>,
    delay: Duration,
    expectations: Expectations,
}

impl LoginExpectationBuilder {
    /// Only accept a login for this username.
    pub fn for_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Respond after `delay`.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn return_ok(self, response: LoginResponse) {
        self.push(Ok(response));
    }

    /// Shorthand for a successful login of `user` with `token`.
    pub fn return_accepted(self, user: UserInfo, token: impl Into<String>) {
        self.return_ok(LoginResponse::accepted(user, token, "Login successful"));
    }

    /// Shorthand for a refused login with `message`.
    pub fn return_rejected(self, message: impl Into<String>) {
        self.return_ok(LoginResponse::rejected(message));
    }

    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<LoginResponse, ApiError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Login {
            username: self.username,
            response,
            delay: self.delay,
        });
    }
}

/// Builder for `user_info` expectations.
pub struct UserInfoExpectationBuilder {
    token: Option<String>,
    delay: Duration,
    expectations: Expectations,
}

impl UserInfoExpectationBuilder {
    /// Only accept a lookup of this token.
    pub fn for_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn return_ok(self, user: Option<UserInfo>) {
        self.push(Ok(user));
    }

    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Option<UserInfo>, ApiError>) {
        self.expectations.lock().unwrap().push_back(Expectation::UserInfo {
            token: self.token,
            response,
            delay: self.delay,
        });
    }
}

/// Builder for `logout` expectations.
pub struct LogoutExpectationBuilder {
    delay: Duration,
    expectations: Expectations,
}

impl LogoutExpectationBuilder {
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn return_ok(self) {
        self.push(Ok(LogoutResponse {
            success: true,
            message: "Logout successful".to_string(),
        }));
    }

    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<LogoutResponse, ApiError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Logout {
            response,
            delay: self.delay,
        });
    }
}

// =============================================================================
// KEY/VALUE STORE
// =============================================================================

/// A [`MemoryStore`] that can be told to refuse writes.
#[derive(Debug, Default)]
pub struct MockStore {
    inner: MemoryStore,
    failing: Mutex<HashSet<String>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `set` or `remove` of `key` fail.
    pub fn fail_writes_for(&self, key: &str) {
        self.failing.lock().unwrap().insert(key.to_string());
    }

    pub fn restore_writes(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn check(&self, key: &str) -> Result<(), StorageError> {
        if self.failing.lock().unwrap().contains(key) {
            return Err(StorageError::WriteRejected(key.to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MockStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[tokio::test]
    async fn test_expectations_answer_in_order() {
        let mock = MockAuthService::new();
        mock.expect_logout().return_err(ApiError::Unavailable);
        mock.expect_user_info()
            .for_token("t")
            .return_ok(Some(UserInfo::new("1", "a", Role::User)));

        assert_eq!(mock.logout().await, Err(ApiError::Unavailable));
        assert!(mock.user_info("t").await.unwrap().is_some());
        assert_eq!(mock.calls(), vec!["logout", "user_info"]);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_leftovers() {
        let mock = MockAuthService::new();
        mock.expect_logout().return_ok();
        mock.verify();
    }

    #[test]
    fn test_mock_store_refuses_selected_keys() {
        let store = MockStore::new();
        store.fail_writes_for("userInfo");
        assert!(store.set("token", "t").is_ok());
        assert!(matches!(
            store.set("userInfo", "{}"),
            Err(StorageError::WriteRejected(_))
        ));

        store.restore_writes();
        assert!(store.set("userInfo", "{}").is_ok());
    }
}
