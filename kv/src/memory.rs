//! In-memory backing store with insertion-ordered enumeration.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{BackingStore, KVError, KVResult};

/// An in-memory backing store.
///
/// Clones share the same key space. Keys enumerate in the order they were
/// first inserted; overwriting a key keeps its position and removing a key
/// keeps the order of the rest.
#[derive(Clone)]
pub struct MemoryStore {
    data: Arc<Mutex<IndexMap<String, String>>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(IndexMap::new())),
        }
    }

    /// Create a store seeded with `entries` in iteration order.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Load a snapshot previously written by [`MemoryStore::save`].
    ///
    /// The file holds a JSON object mapping keys to raw string values. A
    /// missing file yields an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> KVResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| KVError::Io(e.to_string()))?;
        let object: Map<String, Value> =
            serde_json::from_str(&content).map_err(|e| KVError::Serialization(e.to_string()))?;

        let mut data = IndexMap::with_capacity(object.len());
        for (key, value) in object {
            match value {
                Value::String(raw) => {
                    data.insert(key, raw);
                }
                other => {
                    return Err(KVError::Serialization(format!(
                        "value for key {key:?} is not a string: {other}"
                    )));
                }
            }
        }

        debug!("kv: loaded {} keys from {}", data.len(), path.display());
        Ok(Self {
            data: Arc::new(Mutex::new(data)),
        })
    }

    /// Write the current contents to `path` as a JSON object.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> KVResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| KVError::Io(e.to_string()))?;
        }

        let object: Map<String, Value> = self
            .data
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let content = serde_json::to_string_pretty(&object)
            .map_err(|e| KVError::Serialization(e.to_string()))?;
        fs::write(path, content).map_err(|e| KVError::Io(e.to_string()))?;

        debug!("kv: saved {} keys to {}", object.len(), path.display());
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BackingStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.data.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.data.lock().shift_remove(key);
    }

    fn clear(&self) {
        self.data.lock().clear();
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.data
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn keys(&self) -> Vec<String> {
        self.data.lock().keys().cloned().collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.data.lock().contains_key(key)
    }

    fn len(&self) -> usize {
        self.data.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let store = MemoryStore::new();

        // Set and get
        store.set("key1", "value1");
        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert!(store.contains_key("key1"));

        // Non-existent key
        assert_eq!(store.get("nonexistent"), None);
        assert!(!store.contains_key("nonexistent"));

        // Remove
        store.remove("key1");
        assert_eq!(store.get("key1"), None);
        assert!(store.is_empty());

        // Removing an absent key is a no-op
        store.remove("key1");
        assert!(store.is_empty());
    }

    #[test]
    fn test_insertion_order() {
        let store = MemoryStore::new();
        store.set("c", "1");
        store.set("a", "2");
        store.set("b", "3");

        assert_eq!(store.keys(), vec!["c", "a", "b"]);

        // Overwrite keeps position.
        store.set("c", "4");
        assert_eq!(
            store.entries(),
            vec![
                ("c".to_string(), "4".to_string()),
                ("a".to_string(), "2".to_string()),
                ("b".to_string(), "3".to_string()),
            ]
        );

        // Remove keeps the order of the rest.
        store.remove("a");
        assert_eq!(store.keys(), vec!["c", "b"]);
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::from_entries([("x", "1"), ("y", "2")]);
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("shared", "yes");
        assert_eq!(other.get("shared"), Some("yes".to_string()));

        other.remove("shared");
        assert!(!store.contains_key("shared"));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = MemoryStore::from_entries([("b", "{\"x\":1}"), ("a", "plain")]);
        store.save(&path).unwrap();

        let loaded = MemoryStore::load(&path).unwrap();
        assert_eq!(loaded.entries(), store.entries());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::load(dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_rejects_non_string_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"k": 1}"#).unwrap();

        assert!(matches!(
            MemoryStore::load(&path),
            Err(KVError::Serialization(_))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json }").unwrap();

        assert!(matches!(
            MemoryStore::load(&path),
            Err(KVError::Serialization(_))
        ));
    }
}
