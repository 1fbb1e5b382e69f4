//! Storage key layout for namespaced items.
//!
//! ```text
//! {namespace}__{name}   → JSON-encoded Item
//! ```
//!
//! Namespace membership is a raw prefix test against the namespace string,
//! without the separator. A namespace that is itself a prefix of another
//! (e.g. "a" and "ab") therefore also matches the other namespace's keys in
//! the bulk operations.

/// Separator between namespace and item name.
pub const SEPARATOR: &str = "__";

/// Storage key for an item name. Format: "{namespace}__{name}"
pub fn storage_key(namespace: &str, name: &str) -> String {
    format!("{namespace}{SEPARATOR}{name}")
}

/// Whether a backing-store key belongs to `namespace`.
pub fn in_namespace(namespace: &str, key: &str) -> bool {
    key.starts_with(namespace)
}

/// Item name encoded in `key`, if the key has the exact "{namespace}__" prefix.
pub fn name_from_key<'a>(namespace: &str, key: &'a str) -> Option<&'a str> {
    key.strip_prefix(namespace)?.strip_prefix(SEPARATOR)
}
