//! # Mock API
//!
//! In-memory authentication service seeded from an embedded JSON file. Tokens have the form
//! `mock_token_{id}_{millis}`; lookups recover the user id from the third `_`-separated field,
//! so quick-login tokens (`quick_token_{id}_{millis}`) resolve the same way.

use crate::model::{Credentials, Icon, MenuConfig, Role, UserInfo};
use crate::ports::{ApiError, AuthService, LoginResponse, LogoutResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

const SEED: &str = include_str!("seed.json");

/// Simulated network latency per endpoint, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Latency {
    pub login_ms: u64,
    pub user_info_ms: u64,
    pub logout_ms: u64,
    pub menus_ms: u64,
    pub roles_ms: u64,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            login_ms: 800,
            user_info_ms: 300,
            logout_ms: 300,
            menus_ms: 200,
            roles_ms: 100,
        }
    }
}

impl Latency {
    /// No simulated delay at all.
    pub fn none() -> Self {
        Self {
            login_ms: 0,
            user_info_ms: 0,
            logout_ms: 0,
            menus_ms: 0,
            roles_ms: 0,
        }
    }
}

async fn delay(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// A menu row as served by the menu endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemData {
    pub id: String,
    pub path: String,
    pub title: String,
    pub icon: String,
    pub order: u32,
    #[serde(default)]
    pub roles: Vec<Role>,
    pub require_auth: bool,
    pub parent_id: Option<String>,
}

impl From<&MenuItemData> for MenuConfig {
    fn from(item: &MenuItemData) -> Self {
        MenuConfig {
            key: item.path.clone(),
            path: item.path.clone(),
            label: item.title.clone(),
            icon: Some(Icon(item.icon.clone())),
            roles: item.roles.clone(),
            require_auth: item.require_auth,
            order: Some(item.order),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleOption {
    pub role: Role,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SeedAccount {
    #[serde(flatten)]
    user: UserInfo,
    password: String,
}

#[derive(Debug, Deserialize)]
struct Seed {
    users: Vec<SeedAccount>,
    menus: Vec<MenuItemData>,
}

impl Seed {
    fn load() -> Self {
        match serde_json::from_str(SEED) {
            Ok(seed) => seed,
            Err(e) => {
                warn!(error = %e, "Seed data unreadable, using built-in admin account");
                Self::fallback()
            }
        }
    }

    fn fallback() -> Self {
        let mut admin = UserInfo::new("1", "admin", Role::Admin);
        admin.permissions = ["read", "write", "delete", "manage"]
            .into_iter()
            .map(String::from)
            .collect();
        admin.email = Some("admin@example.com".to_string());
        admin.name = Some("System Administrator".to_string());

        Self {
            users: vec![SeedAccount {
                user: admin,
                password: "admin123".to_string(),
            }],
            menus: vec![MenuItemData {
                id: "1".to_string(),
                path: "/home".to_string(),
                title: "Home".to_string(),
                icon: "HomeOutlined".to_string(),
                order: 1,
                roles: vec![Role::Admin, Role::User, Role::Manager],
                require_auth: true,
                parent_id: None,
            }],
        }
    }
}

/// Seeded, in-memory stand-in for the authentication backend.
#[derive(Debug, Clone)]
pub struct MockApi {
    accounts: Vec<SeedAccount>,
    menus: Vec<MenuItemData>,
    latency: Latency,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    /// Seeded accounts with the default latency profile.
    pub fn new() -> Self {
        Self::with_latency(Latency::default())
    }

    /// Seeded accounts without simulated latency.
    pub fn instant() -> Self {
        Self::with_latency(Latency::none())
    }

    pub fn with_latency(latency: Latency) -> Self {
        let seed = Seed::load();
        debug!(
            accounts = seed.users.len(),
            menus = seed.menus.len(),
            "Mock API seeded"
        );
        Self {
            accounts: seed.users,
            menus: seed.menus,
            latency,
        }
    }

    pub fn users(&self) -> impl Iterator<Item = &UserInfo> {
        self.accounts.iter().map(|a| &a.user)
    }

    /// Menu rows visible to `role`. Rows without roles are open to everyone; no role
    /// means no menu.
    pub async fn menus(&self, role: Option<Role>) -> Result<Vec<MenuItemData>, ApiError> {
        delay(self.latency.menus_ms).await;
        let Some(role) = role else {
            return Ok(Vec::new());
        };
        Ok(self
            .menus
            .iter()
            .filter(|m| m.roles.is_empty() || m.roles.contains(&role))
            .cloned()
            .collect())
    }

    /// Role directory with display labels.
    pub async fn roles(&self) -> Result<Vec<RoleOption>, ApiError> {
        delay(self.latency.roles_ms).await;
        Ok(Role::ALL
            .into_iter()
            .map(|role| RoleOption {
                role,
                label: role.label().to_string(),
            })
            .collect())
    }

    fn find_by_id(&self, id: &str) -> Option<&UserInfo> {
        self.users().find(|u| u.id == id)
    }
}

fn user_id_from_token(token: &str) -> Option<&str> {
    token.split('_').nth(2).filter(|id| !id.is_empty())
}

#[async_trait]
impl AuthService for MockApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        delay(self.latency.login_ms).await;

        let account = self
            .accounts
            .iter()
            .find(|a| a.user.username == credentials.username && a.password == credentials.password);

        match account {
            Some(account) => {
                let token = format!(
                    "mock_token_{}_{}",
                    account.user.id,
                    chrono::Utc::now().timestamp_millis()
                );
                info!(username = %account.user.username, "Login accepted");
                Ok(LoginResponse::accepted(
                    account.user.clone(),
                    token,
                    "Login successful",
                ))
            }
            None => {
                info!(username = %credentials.username, "Login rejected");
                Ok(LoginResponse::rejected("Invalid username or password"))
            }
        }
    }

    async fn user_info(&self, token: &str) -> Result<Option<UserInfo>, ApiError> {
        delay(self.latency.user_info_ms).await;
        Ok(user_id_from_token(token).and_then(|id| self.find_by_id(id).cloned()))
    }

    async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        delay(self.latency.logout_ms).await;
        Ok(LogoutResponse {
            success: true,
            message: "Logout successful".to_string(),
        })
    }
}
