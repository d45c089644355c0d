//! Snapshot command implementation.

use super::{build_engine, CommandResult};
use findex_core::IndexDeclaration;
use findex_storage::JsonFileStore;
use std::path::Path;

/// Runs the snapshot command.
pub fn run(data: &Path, indexes: Vec<IndexDeclaration>, output: &Path) -> CommandResult<()> {
    let engine = build_engine(data, indexes)?;
    engine.save(&JsonFileStore::new(output))?;

    println!(
        "Saved {} record(s) and {} index(es) to {}",
        engine.record_count(),
        engine.indexes().len(),
        output.display()
    );
    Ok(())
}
