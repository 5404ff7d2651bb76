//! Durable key/value store
//!
//! A string-to-string map persisted as one JSON object, playing the part of
//! browser local storage. Every `set` rewrites the file atomically: the map
//! is written to a sibling temp file, synced, then renamed over the original.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::WizardError;

/// Key/value store backed by a JSON file
pub struct LocalStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl LocalStore {
    /// Open a store; nothing is read until [`LocalStore::load`]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the map from disk; a missing file is an empty store
    pub fn load(&self) -> Result<(), WizardError> {
        let loaded = read_map(&self.path)?;
        let mut data = self.data.write().map_err(|e| {
            WizardError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = loaded;
        Ok(())
    }

    /// Get a value
    pub fn get(&self, key: &str) -> Result<Option<String>, WizardError> {
        let data = self.data.read().map_err(|e| {
            WizardError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    /// Set several values and persist once
    pub fn set_many<I>(&self, entries: I) -> Result<(), WizardError>
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        let snapshot = {
            let mut data = self.data.write().map_err(|e| {
                WizardError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            for (key, value) in entries {
                data.insert(key.to_string(), value);
            }
            data.clone()
        };
        write_map_atomic(&self.path, &snapshot)
    }

    /// Set one value and persist
    pub fn set(&self, key: &'static str, value: String) -> Result<(), WizardError> {
        self.set_many([(key, value)])
    }

    /// Remove keys and persist
    pub fn remove(&self, keys: &[&str]) -> Result<(), WizardError> {
        let snapshot = {
            let mut data = self.data.write().map_err(|e| {
                WizardError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            for key in keys {
                data.remove(*key);
            }
            data.clone()
        };
        write_map_atomic(&self.path, &snapshot)
    }
}

fn read_map(path: &Path) -> Result<BTreeMap<String, String>, WizardError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let file = File::open(path)
        .map_err(|e| WizardError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| WizardError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

fn write_map_atomic(path: &Path, map: &BTreeMap<String, String>) -> Result<(), WizardError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            WizardError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| WizardError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, map)
        .map_err(|e| WizardError::Storage(format!("Failed to serialize store: {}", e)))?;
    writer
        .flush()
        .map_err(|e| WizardError::Storage(format!("Failed to flush store: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| WizardError::Storage(format!("Failed to sync store: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        WizardError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> LocalStore {
        LocalStore::new(dir.path().join("data").join("local_storage.json"))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.load().unwrap();
        assert_eq!(store.get("currentStep").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store
            .set_many([
                ("currentStep", "2".to_string()),
                ("poolInitialized", "true".to_string()),
            ])
            .unwrap();

        let reopened = store_in(&temp_dir);
        reopened.load().unwrap();
        assert_eq!(reopened.get("currentStep").unwrap().as_deref(), Some("2"));
        assert_eq!(
            reopened.get("poolInitialized").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.set("currentStep", "1".to_string()).unwrap();

        assert!(store.path().exists());
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.set("currentStep", "3".to_string()).unwrap();
        store.remove(&["currentStep"]).unwrap();

        let reopened = store_in(&temp_dir);
        reopened.load().unwrap();
        assert_eq!(reopened.get("currentStep").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        assert!(matches!(store.load(), Err(WizardError::Storage(_))));
    }
}
