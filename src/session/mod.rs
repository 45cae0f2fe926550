//! Client-side session state: the bearer token plus a cached profile snapshot.
//!
//! The store is the single source of truth for "is there a usable
//! credential". Token presence is all it checks — expiry and signature
//! validation stay on the server, which answers 401 through the response
//! pipeline in [`crate::client`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::warn;

const TOKEN_FILE: &str = "access_token";
const USER_INFO_FILE: &str = "user_info.json";

/// Last-known profile snapshot from `/users/me`.
///
/// Display convenience only. Nothing in this struct may drive an
/// authorization decision; authentication state is derived solely from
/// token presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Persistent session storage, injected into the HTTP client at
/// construction time so tests can swap in a fake.
///
/// None of these operations may fail outward: storage problems degrade to
/// "treat as unauthenticated" rather than surfacing errors to callers.
pub trait SessionStore: Send + Sync {
    /// Read the stored bearer token, if any.
    fn token(&self) -> Option<String>;

    /// Overwrite the stored token. The token is opaque; no shape validation.
    fn set_token(&self, token: &str);

    /// Read the cached profile snapshot. Missing or malformed stored data
    /// yields `None`, never an error.
    fn user_info(&self) -> Option<UserInfo>;

    /// Overwrite the cached profile snapshot.
    fn set_user_info(&self, info: &UserInfo);

    /// Remove both the token and the cached profile. Idempotent.
    fn clear(&self);

    /// True iff a non-empty token is present. Presence check only.
    fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }
}

/// File-backed store: two files under the configured data directory, the
/// CLI analog of the browser's local-storage keys.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_info_path(&self) -> PathBuf {
        self.dir.join(USER_INFO_FILE)
    }

    fn write_file(&self, path: &Path, contents: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!("Failed to create session directory {}: {}", self.dir.display(), e);
            return;
        }
        if let Err(e) = fs::write(path, contents) {
            warn!("Failed to write {}: {}", path.display(), e);
        }
    }

    fn remove_file(path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        let token = fs::read_to_string(self.token_path()).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn set_token(&self, token: &str) {
        self.write_file(&self.token_path(), token);
    }

    fn user_info(&self) -> Option<UserInfo> {
        let raw = fs::read_to_string(self.user_info_path()).ok()?;
        match serde_json::from_str(&raw) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("Discarding malformed cached user info: {}", e);
                None
            }
        }
    }

    fn set_user_info(&self, info: &UserInfo) {
        match serde_json::to_string(info) {
            Ok(raw) => self.write_file(&self.user_info_path(), &raw),
            Err(e) => warn!("Failed to serialize user info: {}", e),
        }
    }

    fn clear(&self) {
        Self::remove_file(&self.token_path());
        Self::remove_file(&self.user_info_path());
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<MemorySession>,
}

#[derive(Default)]
struct MemorySession {
    token: Option<String>,
    user_info: Option<UserInfo>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.inner.lock().token.clone()
    }

    fn set_token(&self, token: &str) {
        self.inner.lock().token = Some(token.to_string());
    }

    fn user_info(&self) -> Option<UserInfo> {
        self.inner.lock().user_info.clone()
    }

    fn set_user_info(&self, info: &UserInfo) {
        self.inner.lock().user_info = Some(info.clone());
    }

    fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.token = None;
        inner.user_info = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> UserInfo {
        UserInfo {
            id: "u-42".to_string(),
            full_name: Some("Nguyen Van A".to_string()),
            phone: Some("0901234567".to_string()),
            email: Some("a@example.com".to_string()),
            role: Some("ADMIN".to_string()),
            is_active: Some(true),
        }
    }

    #[test]
    fn test_file_store_token_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        assert_eq!(store.token(), None);
        assert!(!store.is_authenticated());

        store.set_token("abc123");
        assert_eq!(store.token().as_deref(), Some("abc123"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_file_store_user_info_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        assert_eq!(store.user_info(), None);
        let user = sample_user();
        store.set_user_info(&user);
        assert_eq!(store.user_info(), Some(user));
    }

    #[test]
    fn test_file_store_malformed_user_info_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        std::fs::write(dir.path().join(USER_INFO_FILE), "{not json").unwrap();
        assert_eq!(store.user_info(), None);
    }

    #[test]
    fn test_file_store_clear_removes_both_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.set_token("abc123");
        store.set_user_info(&sample_user());

        store.clear();
        assert_eq!(store.token(), None);
        assert_eq!(store.user_info(), None);
        assert!(!store.is_authenticated());

        // A second clear with nothing stored must not fail.
        store.clear();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.set_token("");
        assert_eq!(store.token(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_memory_store_round_trip_and_clear() {
        let store = MemorySessionStore::new();

        store.set_token("tok");
        store.set_user_info(&sample_user());
        assert!(store.is_authenticated());
        assert_eq!(store.user_info(), Some(sample_user()));

        store.clear();
        assert_eq!(store.token(), None);
        assert_eq!(store.user_info(), None);
    }
}
