//! Snapshot store trait definition.

use crate::error::StorageResult;
use serde_json::Value;

/// A store holding a single JSON-compatible value tree.
///
/// # Invariants
///
/// - `retrieve` returns a value equal to the one last passed to `store`
/// - `retrieve` on a store that was never written returns an empty object
/// - Stores must be `Send + Sync` so an engine can be saved from any thread
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - For testing
/// - [`super::JsonFileStore`] - For on-disk snapshots
pub trait SnapshotStore: Send + Sync {
    /// Replaces the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized or written.
    fn store(&self, value: &Value) -> StorageResult<()>;

    /// Returns the stored value, or `{}` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored text cannot be read or parsed.
    fn retrieve(&self) -> StorageResult<Value>;
}
