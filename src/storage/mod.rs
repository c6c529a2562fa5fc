//! Persistence for the application data blob.
//!
//! All tracked state lives in a single JSON document written through a
//! [`KeyValueStore`]. The store abstraction keeps the repository testable
//! with an in-memory backend while production uses a directory of files.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::category::{Category, default_categories};
use crate::domain::entry::Entry;
use crate::domain::settings::Settings;

/// Key under which the data blob is stored.
pub const STORAGE_KEY: &str = "time_track_app_data";

/// Version stamped into every saved blob. A mismatch on load resets to
/// defaults.
pub const DATA_VERSION: &str = "1.0.0";

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode data blob: {0}")]
    JsonEncode(serde_json::Error),
    #[error("failed to parse data blob: {0}")]
    JsonDecode(serde_json::Error),
}

/// Minimal string key/value backend.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removes `key`; absence is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Volatile backend for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Directory-backed store, one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }
}

/// The entire persisted application state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub categories: Vec<Category>,
    pub time_entries: Vec<Entry>,
    pub planned_entries: Vec<Entry>,
    pub settings: Settings,
    pub version: String,
}

impl AppData {
    /// Fresh blob with the seeded categories and default settings.
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        Self {
            categories: default_categories(now),
            time_entries: Vec::new(),
            planned_entries: Vec::new(),
            settings: Settings::default(),
            version: DATA_VERSION.to_string(),
        }
    }
}

/// Loads and saves the [`AppData`] blob through a [`KeyValueStore`].
#[derive(Debug)]
pub struct StorageService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StorageService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the blob, falling back to defaults when the key is absent,
    /// the document does not parse, or its version does not match.
    ///
    /// Decode problems are logged and swallowed so a corrupt blob never
    /// locks the user out of their tracker.
    pub fn load(&self, now: DateTime<Utc>) -> Result<AppData, StorageError> {
        let Some(raw) = self.store.get(STORAGE_KEY)? else {
            return Ok(AppData::with_defaults(now));
        };

        let data: AppData = match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(err) => {
                log::error!("stored data blob is corrupt, resetting to defaults: {err}");
                return Ok(AppData::with_defaults(now));
            }
        };

        if data.version != DATA_VERSION {
            log::error!(
                "stored data version {} does not match {}, resetting to defaults",
                data.version,
                DATA_VERSION
            );
            return Ok(AppData::with_defaults(now));
        }

        Ok(data)
    }

    /// Serializes and writes the blob, stamping the current data version.
    pub fn save(&mut self, data: &AppData) -> Result<(), StorageError> {
        let json = if data.version == DATA_VERSION {
            serde_json::to_string(data)
        } else {
            let mut stamped = data.clone();
            stamped.version = DATA_VERSION.to_string();
            serde_json::to_string(&stamped)
        }
        .map_err(StorageError::JsonEncode)?;
        self.store.set(STORAGE_KEY, &json)
    }

    /// Removes the blob entirely.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(STORAGE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_without_blob_returns_defaults() {
        let service = StorageService::new(MemoryStore::new());
        let data = service.load(Utc::now()).expect("load should succeed");
        assert_eq!(data.categories.len(), 8);
        assert!(data.time_entries.is_empty());
        assert_eq!(data.version, DATA_VERSION);
    }

    #[test]
    fn saved_blob_round_trips() {
        let mut service = StorageService::new(MemoryStore::new());
        let now = Utc::now();
        let data = AppData::with_defaults(now);
        service.save(&data).expect("save should succeed");
        let loaded = service.load(now).expect("load should succeed");
        assert_eq!(loaded, data);
    }

    #[test]
    fn corrupt_blob_resets_to_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(STORAGE_KEY, "{not json")
            .expect("set should succeed");
        let service = StorageService::new(store);
        let data = service.load(Utc::now()).expect("load should not fail");
        assert_eq!(data.categories.len(), 8);
    }

    #[test]
    fn version_mismatch_resets_to_defaults() {
        let now = Utc::now();
        let mut stale = AppData::with_defaults(now);
        stale.categories.clear();
        stale.version = "0.9.0".to_string();
        let mut store = MemoryStore::new();
        store
            .set(
                STORAGE_KEY,
                &serde_json::to_string(&stale).expect("stale blob serializes"),
            )
            .expect("set should succeed");

        let service = StorageService::new(store);
        let data = service.load(now).expect("load should not fail");
        assert_eq!(data.categories.len(), 8);
        assert_eq!(data.version, DATA_VERSION);
    }

    #[test]
    fn save_stamps_current_version() {
        let now = Utc::now();
        let mut data = AppData::with_defaults(now);
        data.version = "0.0.1".to_string();
        let mut service = StorageService::new(MemoryStore::new());
        service.save(&data).expect("save should succeed");
        let loaded = service.load(now).expect("load should succeed");
        assert_eq!(loaded.version, DATA_VERSION);
    }

    #[test]
    fn clear_removes_blob() {
        let now = Utc::now();
        let mut service = StorageService::new(MemoryStore::new());
        let mut data = AppData::with_defaults(now);
        data.settings.theme = crate::domain::settings::Theme::Dark;
        service.save(&data).expect("save should succeed");
        service.clear().expect("clear should succeed");
        let loaded = service.load(now).expect("load should succeed");
        assert_eq!(loaded.settings.theme, crate::domain::settings::Theme::Light);
    }

    #[test]
    fn blob_uses_camel_case_keys() {
        let json =
            serde_json::to_value(AppData::with_defaults(Utc::now())).expect("blob serializes");
        assert!(json.get("timeEntries").is_some());
        assert!(json.get("plannedEntries").is_some());
        assert!(json.get("settings").is_some());
        assert!(json.get("time_entries").is_none());
    }
}
