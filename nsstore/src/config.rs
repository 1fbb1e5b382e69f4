//! Store configuration.
//!
//! Plain serde struct so host applications can embed it in their own
//! YAML or JSON configuration files.

use serde::{Deserialize, Serialize};

/// Configures a [`NamespacedStore`](crate::NamespacedStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Prefix partitioning the backing store's key space.
    #[serde(default)]
    pub namespace: String,
}

impl StoreConfig {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}
