//! Inspect command implementation.

use super::CommandResult;
use findex_core::{EngineConfig, EngineStats, IndexEngine};
use findex_storage::JsonFileStore;
use serde::Serialize;
use std::path::Path;

/// Snapshot inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Snapshot path.
    pub path: String,
    /// File size in bytes.
    pub file_size: u64,
    /// Record and index sizes after rebuilding.
    pub stats: EngineStats,
}

/// Runs the inspect command.
pub fn run(store: &Path, format: &str) -> CommandResult<()> {
    if !store.exists() {
        return Err(format!("No snapshot found at {}", store.display()).into());
    }

    let engine = IndexEngine::load(EngineConfig::default(), &JsonFileStore::new(store))?;
    let result = InspectResult {
        path: store.display().to_string(),
        file_size: store.metadata()?.len(),
        stats: engine.stats(),
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("findex Snapshot Inspection");
    println!("==========================");
    println!();
    println!("Path:    {}", result.path);
    println!("Size:    {} bytes", result.file_size);
    println!("Records: {}", result.stats.records);
    println!();
    println!("Indexes:");
    if result.stats.indexes.is_empty() {
        println!("  (none)");
    }
    for index in &result.stats.indexes {
        let mut line = format!("  {:<24} {} key(s)", index.index.to_string(), index.keys);
        if let Some(values) = index.ordered_values {
            line.push_str(&format!(", {values} ordered value(s)"));
        }
        if let Some(keys) = index.trie_keys {
            line.push_str(&format!(", {keys} trie key(s)"));
        }
        println!("{line}");
    }
}
