//! # In-Memory Store
//!
//! HashMap-backed store for tests and ephemeral sessions. Counts reads
//! and writes so tests can assert "loaded exactly once" / "saved exactly
//! once" without a custom double.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::{KeyValueStore, StoreResult};

/// Ephemeral key-value store.
///
/// Interior mutability (`RefCell`) so the store can be shared behind
/// `Rc` in the app's single-threaded model.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Value>>,
    reads: RefCell<u64>,
    writes: RefCell<u64>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of `read` calls made so far.
    pub fn reads(&self) -> u64 {
        *self.reads.borrow()
    }

    /// Number of `write` calls made so far.
    pub fn writes(&self) -> u64 {
        *self.writes.borrow()
    }

    /// Seeds a value without bumping the write counter.
    pub fn seed(&self, key: &str, value: Value) {
        self.entries.borrow_mut().insert(key.to_string(), value);
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<Value>> {
        *self.reads.borrow_mut() += 1;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &Value) -> StoreResult<()> {
        *self.writes.borrow_mut() += 1;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
