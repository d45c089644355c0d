//! # findex Core
//!
//! In-memory attribute indexing and query engine.
//!
//! This crate provides:
//! - Per-type key normalization for `WORD`, `TEXT`, `NUMBER` and `DATE` fields
//! - Ordered sets (binary search tree, sorted array) for range matches
//! - A character trie for prefix, fuzzy and wildcard matches
//! - Bounded edit distance for fuzzy matching
//! - The [`IndexEngine`], which ingests records and evaluates AND/OR queries
//!
//! ## Example
//!
//! ```rust
//! use findex_core::{Condition, IndexDeclaration, IndexEngine, Match, Query};
//! use serde_json::json;
//!
//! let mut engine = IndexEngine::default();
//! engine
//!     .add_index(IndexDeclaration::word("name"))
//!     .add_index(IndexDeclaration::text("description"));
//! engine.add_data([
//!     json!({ "name": "Alice", "description": "She is cool" }),
//!     json!({ "name": "Charlie", "description": "She is cool too" }),
//! ]);
//!
//! let query = Query::and([
//!     Query::condition(Condition::new(IndexDeclaration::text("description"), "cool too")),
//!     Query::condition(
//!         Condition::new(IndexDeclaration::word("name"), "char").with_match(Match::Prefix),
//!     ),
//! ]);
//! let found = engine.find(&query).unwrap();
//! assert_eq!(found[0]["name"], "Charlie");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod error;
pub mod key;
pub mod levenshtein;
pub mod ordered;
mod path;
pub mod pattern;
mod query;
mod record;
mod trie;
mod types;

pub use config::{EngineConfig, OrderedBackend};
pub use engine::{EngineStats, IndexEngine, IndexStats, Snapshot};
pub use error::{CoreError, CoreResult};
pub use query::{Condition, Query};
pub use record::{RecordId, WrappedRecord};
pub use trie::Trie;
pub use types::{IndexDeclaration, IndexType, Match};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
