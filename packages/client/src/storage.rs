//! Typed string-keyed stores standing in for the browser's storage areas.
//!
//! `LocalStore` persists across runs (a JSON file of string keys to string
//! values); `SessionStore` lives for the process only. Both validate typed
//! reads and fall back to `None` on shape mismatch rather than propagating
//! stale garbage.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Well-known storage keys. Names are part of the persisted contract and
/// must not change.
pub mod keys {
    pub const AVATAR_OPEN: &str = "ui:avatarOpen";
    pub const SIDEBAR_COLLAPSED: &str = "ui:sidebarCollapsed";
    pub const LAST_USER_PATH: &str = "ui:lastUserPath";
    pub const PREFERENCES: &str = "ui:preferences";
    pub const LOCALE: &str = "i18nextLng";
    pub const ADMIN_IP_TAGS: &str = "admin:ipTags";
    /// Session-scoped bearer token.
    pub const AUTH_TOKEN: &str = "token";
    pub const CONTEST_LIST_CACHE: &str = "contestListCache";
    /// Prefix shared by the contest access flag and meta keys, used for
    /// bulk purge on logout.
    pub const CONTEST_ACCESS_PREFIX: &str = "contest_access_";

    /// `contest_access_<id>` — literal `"true"` once the password gate is
    /// cleared.
    pub fn contest_access(contest_id: i64) -> String {
        format!("contest_access_{contest_id}")
    }

    /// `contest_access_meta_<id>` — JSON `{verifiedAt, expiresAt}`.
    pub fn contest_access_meta(contest_id: i64) -> String {
        format!("contest_access_meta_{contest_id}")
    }

    /// `<storageKey>:previewVisible` — literal `"true"` / `"false"` per
    /// markdown editor instance.
    pub fn preview_visible(storage_key: &str) -> String {
        format!("{storage_key}:previewVisible")
    }
}

/// A string-keyed store. Values are raw strings; JSON-typed access goes
/// through [`get_json`]/[`set_json`].
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn keys(&self) -> Vec<String>;

    /// Remove every key starting with `prefix`.
    fn clear_prefix(&self, prefix: &str) {
        for key in self.keys() {
            if key.starts_with(prefix) {
                self.remove(&key);
            }
        }
    }
}

/// Read a JSON value, discarding it (with a warning) when the stored shape
/// no longer matches.
pub fn get_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Discarding stored value with unexpected shape");
            None
        }
    }
}

/// Write a value as JSON. Serialization of these plain data types does not
/// fail; a failure is logged and the key left untouched.
pub fn set_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => warn!(key, error = %e, "Failed to serialize value for storage"),
    }
}

/// Markdown editor preview visibility for `storage_key`. Defaults to visible.
pub fn preview_visible(store: &dyn KvStore, storage_key: &str) -> bool {
    store
        .get(&keys::preview_visible(storage_key))
        .map(|v| v != "false")
        .unwrap_or(true)
}

pub fn set_preview_visible(store: &dyn KvStore, storage_key: &str, visible: bool) {
    let value = if visible { "true" } else { "false" };
    store.set(&keys::preview_visible(storage_key), value);
}

/// Durable store backed by a JSON file. A malformed or missing file yields
/// an empty store; every write persists best-effort.
pub struct LocalStore {
    path: Option<PathBuf>,
    map: Mutex<HashMap<String, String>>,
}

impl LocalStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let map = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Local store file is malformed, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            path: Some(path),
            map: Mutex::new(map),
        }
    }

    /// A store that never touches disk. Used by tests and ephemeral sessions.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            map: Mutex::new(HashMap::new()),
        }
    }

    /// Default on-disk location: `<user data dir>/cress/local.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("cress").join("local.json"))
    }

    fn persist(&self, map: &HashMap<String, String>) {
        let Some(path) = &self.path else { return };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %path.display(), error = %e, "Failed to create local store directory");
                return;
            }
        }
        match serde_json::to_string_pretty(map) {
            Ok(raw) => {
                if let Err(e) = std::fs::write(path, raw) {
                    warn!(path = %path.display(), error = %e, "Failed to persist local store");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize local store"),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.map.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KvStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.lock();
        map.insert(key.to_string(), value.to_string());
        self.persist(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.lock();
        map.remove(key);
        self.persist(&map);
    }

    fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }
}

/// In-memory store scoped to the process, mirroring session storage: a new
/// run starts empty and re-prompts for contest passwords.
#[derive(Default)]
pub struct SessionStore {
    map: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.map.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KvStore for SessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }
}
