//! # Persisted Key/Value Storage
//!
//! The session persists its token and user record through [`KeyValueStore`]. Two backends
//! ship with the crate: [`MemoryStore`] and the file-backed [`JsonFileStore`].
//! [`SessionStorage`] sits on top and keeps the token and user record paired.

use crate::model::UserInfo;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Storage rejected write for key {0}")]
    WriteRejected(String),
}

/// String key/value store with local-storage semantics.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading existing entries if the file exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), keys = entries.len(), "Opened JSON store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(&entries) {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        if let Some(old) = entries.remove(key) {
            if let Err(e) = self.flush(&entries) {
                entries.insert(key.to_string(), old);
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Key names used for the persisted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub token: String,
    pub user: String,
    pub snapshot: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            token: "token".to_string(),
            user: "userInfo".to_string(),
            snapshot: "user-store".to_string(),
        }
    }
}

/// The persisted subset of the session. `loading` is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub user: Option<UserInfo>,
    pub is_authenticated: bool,
}

#[derive(Serialize, Deserialize)]
struct SnapshotEnvelope {
    state: PersistedSession,
    #[serde(default)]
    version: u32,
}

/// Session persistence on top of a [`KeyValueStore`].
///
/// The token and user record are written together and cleared together.
#[derive(Clone)]
pub struct SessionStorage {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl SessionStorage {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(&self.keys.token).filter(|t| !t.is_empty())
    }

    /// Writes the token and user record. If either write fails, both keys are put back to
    /// what they held before the call.
    pub fn save_credentials(&self, token: &str, user: &UserInfo) -> Result<(), StorageError> {
        let record = serde_json::to_string(user)?;
        let previous_token = self.store.get(&self.keys.token);
        let previous_user = self.store.get(&self.keys.user);

        let result = self
            .store
            .set(&self.keys.token, token)
            .and_then(|()| self.store.set(&self.keys.user, &record));
        if result.is_err() {
            self.restore(&self.keys.token, previous_token);
            self.restore(&self.keys.user, previous_user);
        }
        result
    }

    fn restore(&self, key: &str, previous: Option<String>) {
        if self.store.get(key) == previous {
            return;
        }
        let undo = match previous {
            Some(value) => self.store.set(key, &value),
            None => self.store.remove(key),
        };
        if let Err(e) = undo {
            warn!(key, error = %e, "Failed to restore stored credentials");
        }
    }

    /// Removes the token and user record. Both removals are attempted; the first error wins.
    pub fn clear(&self) -> Result<(), StorageError> {
        let token = self.store.remove(&self.keys.token);
        let user = self.store.remove(&self.keys.user);
        token.and(user)
    }

    pub fn load_snapshot(&self) -> Option<PersistedSession> {
        let raw = self.store.get(&self.keys.snapshot)?;
        match serde_json::from_str::<SnapshotEnvelope>(&raw) {
            Ok(envelope) => Some(envelope.state),
            Err(e) => {
                warn!(error = %e, "Stored session snapshot is unreadable");
                None
            }
        }
    }

    pub fn save_snapshot(&self, snapshot: &PersistedSession) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&SnapshotEnvelope {
            state: snapshot.clone(),
            version: 0,
        })?;
        self.store.set(&self.keys.snapshot, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStore;
    use crate::model::Role;

    fn stored_user(store: &dyn KeyValueStore) -> Option<UserInfo> {
        store
            .get("userInfo")
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    fn storage() -> (Arc<MemoryStore>, SessionStorage) {
        let store = Arc::new(MemoryStore::new());
        let storage = SessionStorage::new(store.clone(), StorageKeys::default());
        (store, storage)
    }

    #[test]
    fn test_credentials_written_and_cleared_together() {
        let (store, storage) = storage();
        let user = UserInfo::new("1", "admin", Role::Admin);

        storage.save_credentials("tok", &user).unwrap();
        assert_eq!(storage.token().as_deref(), Some("tok"));
        assert_eq!(stored_user(store.as_ref()), Some(user));
        assert_eq!(store.len(), 2);

        storage.clear().unwrap();
        assert!(storage.token().is_none());
        assert!(stored_user(store.as_ref()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_user_write_restores_previous_pair() {
        let store = Arc::new(MockStore::new());
        let storage = SessionStorage::new(store.clone(), StorageKeys::default());
        let admin = UserInfo::new("1", "admin", Role::Admin);
        storage.save_credentials("old", &admin).unwrap();

        store.fail_writes_for("userInfo");
        let result = storage.save_credentials("new", &admin.with_role(Role::User));
        assert!(matches!(result, Err(StorageError::WriteRejected(_))));

        assert_eq!(storage.token().as_deref(), Some("old"));
        assert_eq!(stored_user(store.as_ref()), Some(admin));
    }

    #[test]
    fn test_user_record_uses_camel_case_keys() {
        let (store, storage) = storage();
        let mut user = UserInfo::new("7", "ops", Role::Manager);
        user.name = Some("Ops".into());
        storage.save_credentials("tok", &user).unwrap();

        let raw = store.get("userInfo").unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["role"], "manager");
        assert_eq!(json["username"], "ops");
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let (store, storage) = storage();
        let snapshot = PersistedSession {
            user: Some(UserInfo::new("1", "admin", Role::Admin)),
            is_authenticated: true,
        };
        storage.save_snapshot(&snapshot).unwrap();

        let reopened = SessionStorage::new(store, StorageKeys::default());
        assert_eq!(reopened.load_snapshot(), Some(snapshot));
    }

    #[test]
    fn test_unreadable_snapshot_is_ignored() {
        let (store, storage) = storage();
        store.set("user-store", "[]").unwrap();
        assert!(storage.load_snapshot().is_none());
    }

    #[test]
    fn test_json_file_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set("token", "abc").unwrap();
        store.set("other", "x").unwrap();
        store.remove("other").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").as_deref(), Some("abc"));
        assert!(reopened.get("other").is_none());
    }

    #[test]
    fn test_json_file_store_keeps_key_when_remove_cannot_flush() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.set("token", "abc").unwrap();

        // A directory in place of the file makes every flush fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(store.remove("token"), Err(StorageError::Io(_))));
        assert_eq!(store.get("token").as_deref(), Some("abc"));
    }

    #[test]
    fn test_json_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StorageError::Encode(_))
        ));
    }
}
