//! JSON file store.
//!
//! The whole store is one JSON object of string values. Every `set` rewrites
//! the file through a sibling temp file and a rename, so a crash mid-write
//! leaves the previous contents intact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::core::error::StoreError;

/// Store persisted as a JSON object in a single file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store at `path`, starting empty if the file does not exist.
    ///
    /// A file that is not a JSON object is treated as empty and gets
    /// replaced on the next write. Non-string values are kept as their JSON
    /// text. Only I/O failures are errors.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            parse_entries(&path, &fs::read_to_string(&path)?)
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), keys = entries.len(), "opened store");
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn parse_entries(path: &Path, text: &str) -> BTreeMap<String, String> {
    if text.trim().is_empty() {
        return BTreeMap::new();
    }
    match serde_json::from_str::<Map<String, Value>>(text) {
        Ok(object) => object
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(raw) => (key, raw),
                other => (key, other.to_string()),
            })
            .collect(),
        Err(err) => {
            warn!(path = %path.display(), %err, "store file is corrupt, starting empty");
            BTreeMap::new()
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("scores.json")).unwrap();
        assert_eq!(store.get("highScore").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set("highScore", "40".into()).unwrap();
            store.set("recentScores", "[40,12]".into()).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("highScore").unwrap().as_deref(), Some("40"));
        assert_eq!(store.get("recentScores").unwrap().as_deref(), Some("[40,12]"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json").unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("highScore").unwrap(), None);

        store.set("highScore", "5".into()).unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("highScore").unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn test_non_string_values_kept_as_json_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, r#"{"highScore": 40, "recentScores": [40, 12], "note": "hi"}"#).unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("highScore").unwrap().as_deref(), Some("40"));
        assert_eq!(store.get("recentScores").unwrap().as_deref(), Some("[40,12]"));
        assert_eq!(store.get("note").unwrap().as_deref(), Some("hi"));
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = TempDir::new().unwrap();

        // A directory exists but cannot be read as a file
        let result = JsonFileStore::open(dir.path());
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
