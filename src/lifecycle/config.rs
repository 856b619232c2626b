use crate::api::Latency;
use crate::guard::AuthGuard;
use crate::ports::StorageKeys;
use crate::routes::{LOGIN_PATH, ROOT_PATH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "ADMIN_CONSOLE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    // Where anonymous users are sent
    pub login_path: String,
    // Where signed-in users are sent from the login page
    pub home_path: String,
    // Paths reachable without signing in. The login path is always added.
    pub public_paths: Vec<String>,
    pub storage: StorageKeys,
    // Command channel capacity for each store
    pub buffer_size: usize,
    // Persist the session to this JSON file instead of memory
    pub storage_path: Option<PathBuf>,
    pub latency: Latency,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            login_path: LOGIN_PATH.to_string(),
            home_path: ROOT_PATH.to_string(),
            public_paths: vec![LOGIN_PATH.to_string(), "/test".to_string()],
            storage: StorageKeys::default(),
            buffer_size: 32,
            storage_path: None,
            latency: Latency::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Loads the file named by [`CONFIG_ENV`], or the defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                tracing::info!(path = ?path, "Loading console config");
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::Invalid("buffer_size must be positive".into()));
        }
        for (name, path) in [("login_path", &self.login_path), ("home_path", &self.home_path)] {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid(format!("{name} must be absolute: {path}")));
            }
        }
        if self.login_path == self.home_path {
            return Err(ConfigError::Invalid(
                "login_path and home_path must differ".into(),
            ));
        }
        Ok(())
    }

    pub fn guard(&self) -> AuthGuard {
        AuthGuard::new(&self.login_path, &self.home_path, self.public_paths.iter().cloned())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ConsoleConfig::from_json(r#"{ "buffer_size": 4 }"#).unwrap();
        assert_eq!(config.buffer_size, 4);
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.storage.token, "token");
        assert_eq!(config.latency.login_ms, 800);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            ConsoleConfig::from_json(r#"{ "buffer_size": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ConsoleConfig::from_json(r#"{ "login_path": "login" }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ConsoleConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "public_paths": ["/status"], "latency": {{ "login_ms": 0 }} }}"#
        )
        .unwrap();

        let config = ConsoleConfig::load(file.path()).unwrap();
        assert_eq!(config.latency.login_ms, 0);
        assert_eq!(config.latency.logout_ms, 300);

        let guard = config.guard();
        assert!(guard.is_public("/status"));
        assert!(guard.is_public("/login"));
        assert!(!guard.is_public("/test"));
    }
}
