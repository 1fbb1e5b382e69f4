use std::sync::Arc;

use nsstore_kv::BackingStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::item::Item;
use crate::keys::{in_namespace, name_from_key, storage_key};

/// Namespaced view over a shared [`BackingStore`].
///
/// Every item lives under `"{namespace}__{name}"` as the JSON encoding of
/// [`Item`]. The store does not own the backing store and holds no state
/// besides the namespace; several views with different namespaces can share
/// one backing store.
///
/// Bulk operations enumerate the backing store and then act key by key.
/// They are not isolated from other writers to the same backing store.
#[derive(Debug)]
pub struct NamespacedStore {
    store: Arc<dyn BackingStore>,
    namespace: String,
}

impl NamespacedStore {
    /// Create a store from a configuration and a backing store handle.
    pub fn new(cfg: StoreConfig, store: Arc<dyn BackingStore>) -> Self {
        Self {
            store,
            namespace: cfg.namespace,
        }
    }

    /// Create a store for `namespace`.
    pub fn with_namespace(namespace: impl Into<String>, store: Arc<dyn BackingStore>) -> Self {
        Self::new(StoreConfig::new(namespace), store)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The shared backing store.
    pub fn store(&self) -> &Arc<dyn BackingStore> {
        &self.store
    }

    fn key(&self, name: &str) -> String {
        storage_key(&self.namespace, name)
    }

    /// Report whether an item named `name` exists in this namespace.
    pub fn has_item(&self, name: &str) -> bool {
        self.store.contains_key(&self.key(name))
    }

    /// Add a new item and return it unchanged.
    ///
    /// Fails with [`StoreError::ItemNotAddableConflictingName`] if the name
    /// is already taken; nothing is written in that case.
    pub fn add_item<V: Serialize>(&self, item: Item<V>) -> StoreResult<Item<V>> {
        if self.has_item(&item.name) {
            return Err(StoreError::ItemNotAddableConflictingName { name: item.name });
        }
        self.write(&item)?;
        Ok(item)
    }

    /// Read the item named `name`.
    ///
    /// Fails with [`StoreError::ItemNotFound`] if it does not exist and with
    /// [`StoreError::FailedToParse`] if the stored value does not decode as
    /// an `Item<V>`.
    pub fn get_item_by_name<V: DeserializeOwned>(&self, name: &str) -> StoreResult<Item<V>> {
        let key = self.key(name);
        if !self.store.contains_key(&key) {
            return Err(StoreError::ItemNotFound {
                name: name.to_string(),
            });
        }
        // Absent here means a concurrent remove raced the presence check.
        let raw = self.store.get(&key).ok_or_else(|| StoreError::ItemNotFound {
            name: name.to_string(),
        })?;
        trace!("nsstore: get item {}", key);
        decode(&key, &raw)
    }

    /// Read every item whose key carries the namespace prefix, in backing
    /// store enumeration order.
    ///
    /// A single undecodable entry fails the whole call with
    /// [`StoreError::FailedToParse`]. That includes valid JSON that is not
    /// shaped like an item: the prefix test is raw, so a foreign key such as
    /// `"username"` under namespace `"user"` holding `"bob"` also fails it.
    pub fn get_all_items_for_namespace(&self) -> StoreResult<Vec<Item<Value>>> {
        let items = self
            .store
            .entries()
            .into_iter()
            .filter(|(key, _)| in_namespace(&self.namespace, key))
            .map(|(key, raw)| decode(&key, &raw))
            .collect::<StoreResult<Vec<_>>>()?;
        trace!("nsstore: read {} items for namespace {:?}", items.len(), self.namespace);
        Ok(items)
    }

    /// Overwrite an existing item and return it unchanged.
    ///
    /// Fails with [`StoreError::ItemNotFound`] if the name does not exist;
    /// never creates an item.
    pub fn update_item<V: Serialize>(&self, item: Item<V>) -> StoreResult<Item<V>> {
        if !self.has_item(&item.name) {
            return Err(StoreError::ItemNotFound { name: item.name });
        }
        self.write(&item)?;
        Ok(item)
    }

    /// Delete the item named `name`.
    ///
    /// Fails with [`StoreError::ItemNotRemovable`] if it does not exist.
    pub fn remove_item_by_name(&self, name: &str) -> StoreResult<()> {
        let key = self.key(name);
        if !self.store.contains_key(&key) {
            return Err(StoreError::ItemNotRemovable {
                name: name.to_string(),
            });
        }
        self.store.remove(&key);
        debug!("nsstore: removed item {}", key);
        Ok(())
    }

    /// Delete every key carrying the namespace prefix. Keys outside the
    /// namespace are left untouched.
    pub fn remove_all_items_for_namespace(&self) {
        let keys: Vec<String> = self
            .store
            .keys()
            .into_iter()
            .filter(|key| in_namespace(&self.namespace, key))
            .collect();
        for key in &keys {
            self.store.remove(key);
        }
        debug!("nsstore: removed {} items for namespace {:?}", keys.len(), self.namespace);
    }

    /// Names of the items stored under the exact `"{namespace}__"` prefix,
    /// in enumeration order. Values are not decoded.
    pub fn names(&self) -> Vec<String> {
        self.store
            .keys()
            .iter()
            .filter_map(|key| name_from_key(&self.namespace, key))
            .map(str::to_string)
            .collect()
    }

    fn write<V: Serialize>(&self, item: &Item<V>) -> StoreResult<()> {
        let key = self.key(&item.name);
        let raw = serde_json::to_string(item).map_err(|e| StoreError::FailedToParse {
            key: key.clone(),
            reason: format!("item is not JSON serializable: {e}"),
        })?;
        self.store.set(&key, &raw);
        debug!("nsstore: wrote item {}", key);
        Ok(())
    }
}

/// Decode a raw stored value. Invalid JSON and JSON that is not shaped like
/// `Item<V>` both fail with [`StoreError::FailedToParse`].
fn decode<V: DeserializeOwned>(key: &str, raw: &str) -> StoreResult<Item<V>> {
    serde_json::from_str(raw).map_err(|e| StoreError::FailedToParse {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
