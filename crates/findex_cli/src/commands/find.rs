//! Find command implementation.

use super::{print_records, read_query, CommandResult};
use findex_core::{EngineConfig, IndexEngine};
use findex_storage::JsonFileStore;
use std::path::Path;

/// Runs the find command.
pub fn run(store: &Path, query: &str, format: &str) -> CommandResult<()> {
    if !store.exists() {
        return Err(format!("No snapshot found at {}", store.display()).into());
    }

    let query = read_query(query)?;
    let engine = IndexEngine::load(EngineConfig::default(), &JsonFileStore::new(store))?;
    let found = engine.find(&query)?;
    print_records(&found, format)
}
