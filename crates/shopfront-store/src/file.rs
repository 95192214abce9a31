//! # JSON File Store
//!
//! One JSON object file on disk holding every key. Loaded fully at open,
//! rewritten fully on every write. Cart snapshots are small, so a
//! whole-file rewrite per save costs nothing noticeable and keeps the
//! format trivially inspectable.
//!
//! ## Degradation
//! A missing file opens empty. A corrupt file opens empty with a `warn` -
//! losing a stale cart beats refusing to start the shop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::{KeyValueStore, StoreError, StoreResult};

/// File-backed key-value store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RefCell<HashMap<String, Value>>,
}

impl JsonFileStore {
    /// Opens (or creates) the store at `path`.
    ///
    /// ## Behavior
    /// - Parent directories are created if missing
    /// - An existing file is loaded as a JSON object
    /// - A corrupt or non-object file is logged and treated as empty
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let parent = path
            .parent()
            .ok_or_else(|| StoreError::BadPath(path.display().to_string()))?;
        fs::create_dir_all(parent)?;

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => Self::parse_entries(&raw, &path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "store file absent, starting empty");
                HashMap::new()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(JsonFileStore {
            path,
            entries: RefCell::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_entries(raw: &str, path: &Path) -> HashMap<String, Value> {
        match serde_json::from_str::<HashMap<String, Value>>(raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "store file is not a JSON object, starting empty"
                );
                HashMap::new()
            }
        }
    }

    fn persist(&self) -> StoreResult<()> {
        let serialized = serde_json::to_string_pretty(&*self.entries.borrow())?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        self.persist()
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        if self.entries.borrow_mut().remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            store.write("cart", &json!({"items": [1, 2]})).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.read("cart").unwrap().unwrap()["items"][1], 2);
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("absent.json")).unwrap();
        assert!(store.read("anything").unwrap().is_none());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/store.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.write("k", &json!(1)).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json {{{").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.read("cart").unwrap().is_none());

        // and the store is usable afterwards
        store.write("cart", &json!([])).unwrap();
        assert!(store.read("cart").unwrap().is_some());
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.write("k", &json!(1)).unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap(); // absent key is a no-op

        let reopened = JsonFileStore::open(&path).unwrap();
        assert!(reopened.read("k").unwrap().is_none());
    }
}
