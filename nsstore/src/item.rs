use serde::{Deserialize, Serialize};

/// A named value, the unit of storage.
///
/// Serialized as `{"name": ..., "value": ...}` with `name` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item<V = String> {
    pub name: String,
    pub value: V,
}

impl<V> Item<V> {
    pub fn new(name: impl Into<String>, value: V) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
