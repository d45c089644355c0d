//! CLI command implementations.

pub mod find;
pub mod inspect;
pub mod query;
pub mod snapshot;

use findex_core::{EngineConfig, IndexDeclaration, IndexEngine, Query};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Result type shared by the commands.
pub type CommandResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Reads a JSON file holding an array of records.
pub fn read_records(path: &Path) -> CommandResult<Vec<Value>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    match serde_json::from_str(&text)? {
        Value::Array(records) => Ok(records),
        _ => Err(format!("{} does not hold a JSON array", path.display()).into()),
    }
}

/// Parses a query argument: inline JSON, or `@<file>`.
pub fn read_query(arg: &str) -> CommandResult<Query> {
    let text = match arg.strip_prefix('@') {
        Some(path) => {
            fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?
        }
        None => arg.to_owned(),
    };
    Ok(Query::from_json(&text)?)
}

/// Declares the indexes, then ingests the data file.
pub fn build_engine(data: &Path, indexes: Vec<IndexDeclaration>) -> CommandResult<IndexEngine> {
    let records = read_records(data)?;
    debug!(records = records.len(), indexes = indexes.len(), "building engine");

    let mut engine = IndexEngine::new(EngineConfig::default());
    for declaration in indexes {
        engine.add_index(declaration);
    }
    engine.add_data(records);
    Ok(engine)
}

/// Prints query results, one compact JSON record per line or as a
/// pretty-printed array.
pub fn print_records(records: &[Arc<Value>], format: &str) -> CommandResult<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        _ => {
            for record in records {
                println!("{record}");
            }
            println!();
            println!("{} record(s) found", records.len());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use findex_core::Match;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn records_must_be_an_array() {
        let dir = TempDir::new().unwrap();
        let array = write(&dir, "array.json", r#"[{ "name": "Alice" }, { "name": "Beat" }]"#);
        assert_eq!(read_records(&array).unwrap().len(), 2);

        let object = write(&dir, "object.json", r#"{ "name": "Alice" }"#);
        assert!(read_records(&object).is_err());
        assert!(read_records(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn query_inline_or_from_file() {
        let text = r#"{ "condition": { "index": { "key": "name", "type": "WORD" }, "value": "al", "match": "PREFIX" } }"#;
        let inline = read_query(text).unwrap();

        let dir = TempDir::new().unwrap();
        let path = write(&dir, "query.json", text);
        let from_file = read_query(&format!("@{}", path.display())).unwrap();
        assert_eq!(inline, from_file);

        assert!(read_query("{ \"nope\": 1 }").is_err());
        assert!(read_query("@/definitely/not/here.json").is_err());
    }

    #[test]
    fn engine_from_data_file() {
        let dir = TempDir::new().unwrap();
        let data = write(
            &dir,
            "people.json",
            r#"[{ "name": "Alice", "age": 30 }, { "name": "Beat", "age": 25 }]"#,
        );
        let indexes = vec!["name:WORD".parse().unwrap(), "age:NUMBER".parse().unwrap()];
        let engine = build_engine(&data, indexes).unwrap();
        assert_eq!(engine.record_count(), 2);

        let query = Query::condition(
            findex_core::Condition::new(IndexDeclaration::number("age"), 28).with_match(Match::Lt),
        );
        let found = engine.find(&query).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], "Beat");
    }
}
