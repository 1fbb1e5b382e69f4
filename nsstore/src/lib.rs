//! Namespaced item storage over a shared key/value backing store.
//!
//! A [`NamespacedStore`] partitions a flat [`BackingStore`] into named items
//! under a namespace prefix and offers create/read/update/delete/list
//! operations with existence and uniqueness checks.
//!
//! ```text
//! {namespace}__{name}   → JSON {"name": ..., "value": ...}
//! ```

pub mod config;
pub mod error;
pub mod item;
pub mod keys;
pub mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use item::Item;
pub use store::NamespacedStore;

pub use nsstore_kv::{BackingStore, MemoryStore};
