//! Backing store interface for namespaced item storage.
//!
//! Models a synchronous, process-wide flat key/value space with string keys
//! and raw string values. Provides an insertion-ordered in-memory
//! implementation that can be snapshotted to disk.

pub mod memory;

use std::fmt;
use thiserror::Error;

/// Errors that can occur while loading or saving a store snapshot.
#[derive(Error, Debug)]
pub enum KVError {
    #[error("kv: io error: {0}")]
    Io(String),

    #[error("kv: serialization error: {0}")]
    Serialization(String),
}

/// Result type for KV snapshot operations.
pub type KVResult<T> = Result<T, KVError>;

/// Flat key/value backing store.
///
/// The store is shared and externally mutable: several namespaced views may
/// use one store at the same time, and keys written by other owners can
/// appear at any point. Every method is call-and-return and never fails.
pub trait BackingStore: Send + Sync {
    /// Get the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Insert or overwrite `key`.
    fn set(&self, key: &str, value: &str);

    /// Remove `key` if present.
    fn remove(&self, key: &str);

    /// Remove every key.
    fn clear(&self);

    /// Snapshot of all key/value pairs, in enumeration order.
    fn entries(&self) -> Vec<(String, String)>;

    /// Snapshot of all keys, in enumeration order.
    fn keys(&self) -> Vec<String> {
        self.entries().into_iter().map(|(k, _)| k).collect()
    }

    /// Whether `key` is currently in the key set.
    fn contains_key(&self, key: &str) -> bool {
        self.keys().iter().any(|k| k == key)
    }

    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for dyn BackingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BackingStore {{ ... }}")
    }
}

pub use memory::MemoryStore;
