//! # findex Storage
//!
//! Snapshot persistence collaborators for findex.
//!
//! A store keeps exactly one JSON value tree: whatever was stored last.
//! Stores are **opaque** - they do not know what an index declaration or a
//! record is. The engine decides what goes into the tree.
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral use
//! - [`JsonFileStore`] - Tab-indented JSON text in a single file
//!
//! ## Example
//!
//! ```rust
//! use findex_storage::{InMemoryStore, SnapshotStore};
//! use serde_json::json;
//!
//! let store = InMemoryStore::new();
//! assert_eq!(store.retrieve().unwrap(), json!({}));
//!
//! store.store(&json!({ "records": [1, 2, 3] })).unwrap();
//! assert_eq!(store.retrieve().unwrap()["records"][2], 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod format;
mod memory;

pub use backend::SnapshotStore;
pub use error::{StorageError, StorageResult};
pub use file::JsonFileStore;
pub use format::to_pretty_json;
pub use memory::InMemoryStore;
