//! In-memory snapshot store for testing.

use crate::backend::SnapshotStore;
use crate::error::StorageResult;
use crate::format::to_pretty_json;
use parking_lot::RwLock;
use serde_json::Value;

/// An in-memory snapshot store.
///
/// The value is kept as serialized text rather than as a `Value`, so a
/// store/retrieve cycle goes through the same encoding as a file would.
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use findex_storage::{InMemoryStore, SnapshotStore};
/// use serde_json::json;
///
/// let store = InMemoryStore::new();
/// store.store(&json!([1, 2])).unwrap();
/// assert_eq!(store.retrieve().unwrap(), json!([1, 2]));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    text: RwLock<Option<String>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds the given text.
    ///
    /// Useful for testing how callers react to corrupt snapshots.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: RwLock::new(Some(text.into())),
        }
    }

    /// Returns a copy of the stored text, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.text.read().clone()
    }

    /// Forgets the stored value.
    pub fn clear(&self) {
        *self.text.write() = None;
    }
}

impl SnapshotStore for InMemoryStore {
    fn store(&self, value: &Value) -> StorageResult<()> {
        let text = to_pretty_json(value)?;
        *self.text.write() = Some(text);
        Ok(())
    }

    fn retrieve(&self) -> StorageResult<Value> {
        match self.text.read().as_deref() {
            Some(text) => Ok(serde_json::from_str(text)?),
            None => Ok(Value::Object(serde_json::Map::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use serde_json::json;

    #[test]
    fn empty_store_yields_empty_object() {
        let store = InMemoryStore::new();
        assert_eq!(store.retrieve().unwrap(), json!({}));
        assert!(store.text().is_none());
    }

    #[test]
    fn store_and_retrieve() {
        let store = InMemoryStore::new();
        let value = json!({ "name": "Alice", "age": 30 });

        store.store(&value).unwrap();
        assert_eq!(store.retrieve().unwrap(), value);
    }

    #[test]
    fn store_replaces_previous_value() {
        let store = InMemoryStore::new();
        store.store(&json!({ "v": 1 })).unwrap();
        store.store(&json!({ "v": 2 })).unwrap();

        assert_eq!(store.retrieve().unwrap(), json!({ "v": 2 }));
    }

    #[test]
    fn clear_forgets_value() {
        let store = InMemoryStore::new();
        store.store(&json!([1])).unwrap();
        store.clear();

        assert_eq!(store.retrieve().unwrap(), json!({}));
    }

    #[test]
    fn corrupt_text_is_an_error() {
        let store = InMemoryStore::with_text("{ not json");
        assert!(matches!(store.retrieve(), Err(StorageError::Json(_))));
    }
}
