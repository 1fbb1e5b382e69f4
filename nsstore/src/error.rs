use thiserror::Error;

/// Failures of namespaced store operations.
///
/// Each kind carries the offending key or name for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The stored raw value is not valid JSON for an item, or an item could
    /// not be encoded.
    #[error("nsstore: failed to parse item at {key:?}: {reason}")]
    FailedToParse { key: String, reason: String },

    #[error("nsstore: item not found: {name:?}")]
    ItemNotFound { name: String },

    /// An item with the same name already exists; update it instead.
    #[error("nsstore: item not addable, conflicting name: {name:?}")]
    ItemNotAddableConflictingName { name: String },

    #[error("nsstore: item not removable: {name:?}")]
    ItemNotRemovable { name: String },
}

/// Result type for namespaced store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_name() {
        let err = StoreError::ItemNotFound {
            name: "number".into(),
        };
        assert_eq!(err.to_string(), "nsstore: item not found: \"number\"");

        let err = StoreError::FailedToParse {
            key: "ns__a".into(),
            reason: "expected value".into(),
        };
        assert_eq!(
            err.to_string(),
            "nsstore: failed to parse item at \"ns__a\": expected value"
        );
    }
}
