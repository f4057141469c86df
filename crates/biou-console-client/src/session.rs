// crates/biou-console-client/src/session.rs
// ============================================================================
// Module: Session Context
// Description: Persisted credentials and preferences behind a storage trait.
// Purpose: Hold the bearer token, refresh token, user info, and UI prefs.
// Dependencies: biou-console-util, serde, serde_json, tempfile, thiserror
// ============================================================================

//! ## Overview
//! A [`Session`] is an explicit context object over an injected
//! [`KeyValueStorage`]. It is created once and shared by the client and the
//! API helpers; nothing here is global.
//!
//! Values are JSON-encoded except the two token strings, which are stored
//! raw. Reads are lenient: a corrupted JSON value reads as absent.
//!
//! ## Invariants
//! - Every multi-key store or clear is a single [`KeyValueStorage::apply`]
//!   call, and each backend applies a batch under one lock.
//! - [`FileStorage`] replaces its file atomically (temp file then rename).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use biou_console_util::safe_json_parse;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::models::auth::LoginResponse;
use crate::models::auth::UserInfo;

// ============================================================================
// SECTION: Keys
// ============================================================================

/// Persisted storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    /// Bearer token (raw string).
    Token,
    /// Refresh token (raw string).
    RefreshToken,
    /// JSON-encoded [`UserInfo`].
    UserInfo,
    /// JSON-encoded [`Theme`].
    Theme,
    /// JSON-encoded language tag.
    Language,
    /// JSON-encoded boolean.
    SidebarCollapsed,
}

impl StorageKey {
    /// Returns the storage key string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "biou_token",
            Self::RefreshToken => "biou_refresh_token",
            Self::UserInfo => "biou_user_info",
            Self::Theme => "biou_theme",
            Self::Language => "biou_language",
            Self::SidebarCollapsed => "biou_sidebar_collapsed",
        }
    }
}

/// Keys removed by logout and by the unauthorized procedure.
pub const CREDENTIAL_KEYS: [StorageKey; 3] =
    [StorageKey::Token, StorageKey::RefreshToken, StorageKey::UserInfo];

/// Display theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

// ============================================================================
// SECTION: Storage Trait
// ============================================================================

/// Storage failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("storage io error: {0}")]
    Io(String),
    /// A value could not be encoded.
    #[error("storage encode error: {0}")]
    Encode(String),
}

/// A single mutation applied by [`KeyValueStorage::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageChange {
    /// Set `key` to `value`.
    Set {
        /// Storage key.
        key: String,
        /// Stored string.
        value: String,
    },
    /// Remove `key` if present.
    Remove {
        /// Storage key.
        key: String,
    },
}

/// String-keyed persistent storage.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Applies `changes` in order as one locked operation.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be written.
    fn apply(&self, changes: &[StorageChange]) -> Result<(), StorageError>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.apply(&[StorageChange::Set {
            key: key.to_string(),
            value: value.to_string(),
        }])
    }

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.apply(&[StorageChange::Remove {
            key: key.to_string(),
        }])
    }
}

/// Applies `changes` to an in-memory map.
fn apply_to_map(map: &mut BTreeMap<String, String>, changes: &[StorageChange]) {
    for change in changes {
        match change {
            StorageChange::Set {
                key,
                value,
            } => {
                map.insert(key.clone(), value.clone());
            }
            StorageChange::Remove {
                key,
            } => {
                map.remove(key);
            }
        }
    }
}

/// Locks `mutex`, recovering the data from a poisoned lock.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

// ============================================================================
// SECTION: Memory Storage
// ============================================================================

/// Process-local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    /// Stored entries.
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all entries.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        lock(&self.entries).clone()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn apply(&self, changes: &[StorageChange]) -> Result<(), StorageError> {
        apply_to_map(&mut lock(&self.entries), changes);
        Ok(())
    }
}

// ============================================================================
// SECTION: File Storage
// ============================================================================

/// JSON-object file storage.
///
/// A missing or unreadable-as-JSON file reads as empty.
#[derive(Debug)]
pub struct FileStorage {
    /// Backing file path.
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    guard: Mutex<()>,
}

impl FileStorage {
    /// Creates a store backed by `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole map from disk.
    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(safe_json_parse(Some(&text), BTreeMap::new())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(StorageError::Io(format!("{}: {err}", self.path.display()))),
        }
    }

    /// Replaces the file with `map` via a temp file in the same directory.
    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|err| StorageError::Io(err.to_string()))?;
        let payload =
            serde_json::to_vec_pretty(map).map_err(|err| StorageError::Encode(err.to_string()))?;
        let mut temp =
            NamedTempFile::new_in(&dir).map_err(|err| StorageError::Io(err.to_string()))?;
        temp.write_all(&payload).map_err(|err| StorageError::Io(err.to_string()))?;
        temp.as_file().sync_all().map_err(|err| StorageError::Io(err.to_string()))?;
        temp.persist(&self.path).map_err(|err| StorageError::Io(err.error.to_string()))?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = lock(&self.guard);
        Ok(self.read_map()?.remove(key))
    }

    fn apply(&self, changes: &[StorageChange]) -> Result<(), StorageError> {
        let _guard = lock(&self.guard);
        let mut map = self.read_map()?;
        apply_to_map(&mut map, changes);
        self.write_map(&map)
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Credentials and preferences for one console user.
#[derive(Clone)]
pub struct Session {
    /// Backing storage.
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("storage", &"<storage>").finish()
    }
}

impl Session {
    /// Creates a session over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
        }
    }

    /// Creates a session over fresh [`MemoryStorage`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Returns the underlying storage.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }

    /// Returns the bearer token; empty values read as absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be read.
    pub fn token(&self) -> Result<Option<String>, StorageError> {
        self.raw(StorageKey::Token)
    }

    /// Returns the refresh token; empty values read as absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be read.
    pub fn refresh_token(&self) -> Result<Option<String>, StorageError> {
        self.raw(StorageKey::RefreshToken)
    }

    /// Returns true when a bearer token is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be read.
    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self.token()?.is_some())
    }

    /// Returns the cached user profile.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be read.
    pub fn user_info(&self) -> Result<Option<UserInfo>, StorageError> {
        self.get_json(StorageKey::UserInfo, None)
    }

    /// Stores the token, refresh token, and user info from a login.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be written.
    pub fn store_login(&self, login: &LoginResponse) -> Result<(), StorageError> {
        let user_info = serde_json::to_string(&login.user_info)
            .map_err(|err| StorageError::Encode(err.to_string()))?;
        self.storage.apply(&[
            set(StorageKey::Token, login.token.clone()),
            set(StorageKey::RefreshToken, login.refresh_token.clone()),
            set(StorageKey::UserInfo, user_info),
        ])
    }

    /// Replaces the bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be written.
    pub fn store_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(StorageKey::Token.as_str(), token)
    }

    /// Replaces the cached user profile.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be written.
    pub fn store_user_info(&self, user_info: &UserInfo) -> Result<(), StorageError> {
        self.set_json(StorageKey::UserInfo, user_info)
    }

    /// Removes the token, refresh token, and user info in one operation.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be written.
    pub fn clear_credentials(&self) -> Result<(), StorageError> {
        let changes: Vec<StorageChange> = CREDENTIAL_KEYS
            .iter()
            .map(|key| StorageChange::Remove {
                key: key.as_str().to_string(),
            })
            .collect();
        self.storage.apply(&changes)
    }

    /// Reads a JSON value, returning `default` when absent or malformed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be read.
    pub fn get_json<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> Result<T, StorageError> {
        let raw = self.storage.get(key.as_str())?;
        Ok(safe_json_parse(raw.as_deref(), default))
    }

    /// Stores a JSON-encoded value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when encoding or writing fails.
    pub fn set_json<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let encoded =
            serde_json::to_string(value).map_err(|err| StorageError::Encode(err.to_string()))?;
        self.storage.set(key.as_str(), &encoded)
    }

    /// Returns the theme preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be read.
    pub fn theme(&self) -> Result<Theme, StorageError> {
        self.get_json(StorageKey::Theme, Theme::default())
    }

    /// Stores the theme preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be written.
    pub fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.set_json(StorageKey::Theme, &theme)
    }

    /// Returns the language preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be read.
    pub fn language(&self) -> Result<Option<String>, StorageError> {
        self.get_json(StorageKey::Language, None)
    }

    /// Stores the language preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be written.
    pub fn set_language(&self, language: &str) -> Result<(), StorageError> {
        self.set_json(StorageKey::Language, language)
    }

    /// Returns whether the sidebar is collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be read.
    pub fn sidebar_collapsed(&self) -> Result<bool, StorageError> {
        self.get_json(StorageKey::SidebarCollapsed, false)
    }

    /// Stores whether the sidebar is collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be written.
    pub fn set_sidebar_collapsed(&self, collapsed: bool) -> Result<(), StorageError> {
        self.set_json(StorageKey::SidebarCollapsed, &collapsed)
    }

    /// Reads a raw string value, treating empty strings as absent.
    fn raw(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.storage.get(key.as_str())?.filter(|value| !value.is_empty()))
    }
}

/// Builds a set change for `key`.
fn set(key: StorageKey, value: String) -> StorageChange {
    StorageChange::Set {
        key: key.as_str().to_string(),
        value,
    }
}
