//! # shopfront-store: Persistence Layer
//!
//! A synchronous key-value store, the Rust-side analog of a browser's
//! localStorage. The cart snapshot is the only well-known tenant, but the
//! interface is a plain string-keyed JSON map so settings or other slots
//! can share the same file.
//!
//! ## Store Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     KeyValueStore (trait)                               │
//! │          read(key) / write(key, value) / remove(key)                    │
//! │                             │                                           │
//! │            ┌────────────────┴────────────────┐                          │
//! │            ▼                                 ▼                          │
//! │   ┌─────────────────┐              ┌──────────────────┐                 │
//! │   │  JsonFileStore  │              │   MemoryStore    │                 │
//! │   │  one JSON file  │              │  HashMap, with   │                 │
//! │   │  on disk        │              │  op counters for │                 │
//! │   │                 │              │  tests           │                 │
//! │   └─────────────────┘              └──────────────────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All operations are synchronous and take `&self`; implementations use
//! interior mutability so a store can be shared behind `Rc`.

mod error;
mod file;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde_json::Value;

/// Synchronous key-value persistence.
///
/// Keys are plain strings, values are JSON. `read` of an absent key is
/// `Ok(None)`, not an error; callers that want the localStorage-style
/// "never throws" contract log failures and degrade.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any.
    fn read(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &Value) -> StoreResult<()>;

    /// Removes the value stored under `key`. Removing an absent key is
    /// a no-op.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
