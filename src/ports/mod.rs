//! Contracts for the collaborators the console talks to: the authentication service and
//! the persisted key/value store.

pub mod storage;

pub use storage::{
    JsonFileStore, KeyValueStore, MemoryStore, PersistedSession, SessionStorage, StorageError,
    StorageKeys,
};

use crate::model::{Credentials, UserInfo};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Transport-level failure talking to the authentication service.
///
/// A rejected login is not an error: it comes back as a [`LoginResponse`] with
/// `success == false`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Service unavailable")]
    Unavailable,
}

impl From<String> for ApiError {
    fn from(s: String) -> Self {
        ApiError::Transport(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    pub user: UserInfo,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LoginData>,
}

impl LoginResponse {
    pub fn accepted(user: UserInfo, token: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(LoginData {
                user,
                token: token.into(),
            }),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Authentication and session lookup.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// Resolves a token to its user. `Ok(None)` means the token is not valid.
    async fn user_info(&self, token: &str) -> Result<Option<UserInfo>, ApiError>;

    async fn logout(&self) -> Result<LogoutResponse, ApiError>;
}
