//! File-based snapshot store.

use crate::backend::SnapshotStore;
use crate::error::{StorageError, StorageResult};
use crate::format::to_pretty_json;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A snapshot store backed by a single JSON file.
///
/// The whole value is rewritten on every `store`. Missing parent
/// directories are created on demand. No fsync is performed; a crash in the
/// middle of a write can leave a truncated file behind.
///
/// # Example
///
/// ```no_run
/// use findex_storage::{JsonFileStore, SnapshotStore};
/// use serde_json::json;
///
/// let store = JsonFileStore::new("data/snapshot.json");
/// store.store(&json!({ "records": [] })).unwrap();
/// let value = store.retrieve().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the given file path. Nothing is touched on disk
    /// until the first `store` or `retrieve`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> StorageResult<()> {
        if self.path.file_name().is_none() {
            return Err(StorageError::InvalidPath {
                path: self.path.clone(),
            });
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl SnapshotStore for JsonFileStore {
    fn store(&self, value: &Value) -> StorageResult<()> {
        self.ensure_parent()?;
        let text = to_pretty_json(value)?;
        fs::write(&self.path, text)?;

        debug!(path = %self.path.display(), "snapshot written");
        Ok(())
    }

    fn retrieve(&self) -> StorageResult<Value> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot on disk");
                return Ok(Value::Object(serde_json::Map::new()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_empty_object() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        assert_eq!(store.retrieve().unwrap(), json!({}));
        assert!(!store.path().exists());
    }

    #[test]
    fn store_and_retrieve() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("snapshot.json"));
        let value = json!({ "records": [{ "name": "Alice" }] });

        store.store(&value).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.retrieve().unwrap(), value);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("snapshot.json");
        let store = JsonFileStore::new(&path);

        store.store(&json!([1, 2, 3])).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_is_tab_indented() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("snapshot.json"));

        store.store(&json!({ "a": 1 })).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "{\n\t\"a\": 1\n}");
    }

    #[test]
    fn overwrites_previous_snapshot() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("snapshot.json"));

        store.store(&json!({ "generation": 1 })).unwrap();
        store.store(&json!({ "generation": 2 })).unwrap();

        assert_eq!(store.retrieve().unwrap(), json!({ "generation": 2 }));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "{ broken").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.retrieve(), Err(StorageError::Json(_))));
    }

    #[test]
    fn directory_path_is_rejected() {
        let store = JsonFileStore::new("..");
        assert!(matches!(
            store.store(&json!({})),
            Err(StorageError::InvalidPath { .. })
        ));
    }
}
