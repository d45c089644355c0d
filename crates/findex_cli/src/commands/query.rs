//! Query command implementation.

use super::{build_engine, print_records, read_query, CommandResult};
use findex_core::IndexDeclaration;
use std::path::Path;

/// Runs the query command.
pub fn run(
    data: &Path,
    indexes: Vec<IndexDeclaration>,
    query: &str,
    format: &str,
) -> CommandResult<()> {
    let query = read_query(query)?;
    let engine = build_engine(data, indexes)?;
    let found = engine.find(&query)?;
    print_records(&found, format)
}
