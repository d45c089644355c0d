//! Test fixtures and engine helpers.
//!
//! Provides sample record sets, engines preloaded with them, and snapshot
//! stores that clean up after themselves.

use findex_core::{Condition, IndexDeclaration, IndexEngine, Match, Query};
use findex_storage::JsonFileStore;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Three people with a name, age, birthday and description.
pub fn people() -> Vec<Value> {
    vec![
        json!({ "name": "Alice", "age": 30, "birthday": "1988-01-01", "description": "She is cool" }),
        json!({ "name": "Beat", "age": 25, "birthday": "1993-01-01", "description": "He is cool" }),
        json!({ "name": "Charlie", "age": 35, "birthday": "1983-01-01", "description": "She is cool too" }),
    ]
}

/// One index per field of [`people`].
pub fn people_indexes() -> Vec<IndexDeclaration> {
    vec![
        IndexDeclaration::word("name"),
        IndexDeclaration::number("age"),
        IndexDeclaration::date("birthday"),
        IndexDeclaration::text("description"),
    ]
}

/// An engine with [`people_indexes`] declared and [`people`] ingested.
pub fn people_engine() -> IndexEngine {
    let mut engine = IndexEngine::default();
    for declaration in people_indexes() {
        engine.add_index(declaration);
    }
    engine.add_data(people());
    engine
}

/// Records carrying only a name.
pub fn named(names: &[&str]) -> Vec<Value> {
    names.iter().map(|name| json!({ "name": name })).collect()
}

/// An engine with a `WORD` index on `name` over [`named`] records.
pub fn names_engine(names: &[&str]) -> IndexEngine {
    let mut engine = IndexEngine::default();
    engine.add_index(IndexDeclaration::word("name"));
    engine.add_data(named(names));
    engine
}

/// Builds a single-condition query.
pub fn condition(index: IndexDeclaration, value: impl Into<Value>, match_kind: Match) -> Query {
    Query::condition(Condition::new(index, value).with_match(match_kind))
}

/// Equality on a `WORD` index.
pub fn word_eq(key: &str, value: &str) -> Query {
    condition(IndexDeclaration::word(key), value, Match::Eq)
}

/// The `name` field of each result, in result order.
pub fn names_of(results: &[Arc<Value>]) -> Vec<String> {
    results
        .iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_owned())
        .collect()
}

/// A JSON file store in a temporary directory, removed on drop.
pub struct TestStore {
    /// The store.
    pub store: JsonFileStore,
    /// Kept alive to prevent cleanup.
    _temp_dir: TempDir,
}

impl TestStore {
    /// Creates a store whose file does not exist yet.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = JsonFileStore::new(temp_dir.path().join("snapshots").join("findex.json"));
        Self {
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestStore {
    type Target = JsonFileStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Runs a test with a temporary file store.
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&JsonFileStore) -> R,
{
    let test_store = TestStore::new();
    f(&test_store.store)
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// An engine over `count` numbered records: `n` is a `NUMBER`, `tag`
    /// a `WORD` cycling through `red`, `green`, `blue`.
    pub fn numbered_engine(count: usize) -> IndexEngine {
        const TAGS: [&str; 3] = ["red", "green", "blue"];

        let mut engine = IndexEngine::default();
        engine
            .add_index(IndexDeclaration::number("n"))
            .add_index(IndexDeclaration::word("tag"));
        engine.add_data((0..count).map(|n| json!({ "n": n, "tag": TAGS[n % TAGS.len()] })));
        engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findex_storage::SnapshotStore;

    #[test]
    fn people_engine_is_loaded() {
        let engine = people_engine();
        assert_eq!(engine.record_count(), 3);
        assert_eq!(engine.indexes().len(), 4);
    }

    #[test]
    fn word_eq_helper() {
        let engine = people_engine();
        let found = engine.find(&word_eq("name", "CHARLIE")).unwrap();
        assert_eq!(names_of(&found), ["Charlie"]);
    }

    #[test]
    fn temp_store_starts_empty() {
        with_temp_store(|store| {
            assert_eq!(store.retrieve().unwrap(), json!({}));
        });
    }

    #[test]
    fn numbered_scenario() {
        let engine = scenarios::numbered_engine(9);
        let found = engine
            .find(&condition(IndexDeclaration::number("n"), 6, Match::Gte))
            .unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(engine.find(&word_eq("tag", "blue")).unwrap().len(), 3);
    }
}
