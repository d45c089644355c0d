//! Human-readable snapshot text.

use crate::error::StorageResult;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::io;

/// Indentation used for snapshot files.
const INDENT: &[u8] = b"\t";

/// Renders a value as pretty-printed JSON indented with tabs.
///
/// Empty objects and arrays render as `{}` and `[]`; strings are escaped
/// as usual, so embedded newlines become `\n`.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn to_pretty_json(value: &Value) -> StorageResult<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;

    let text = String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn indents_with_tabs() {
        let text = to_pretty_json(&json!({ "a": [1, 2] })).unwrap();
        assert_eq!(text, "{\n\t\"a\": [\n\t\t1,\n\t\t2\n\t]\n}");
    }

    #[test]
    fn empty_containers() {
        assert_eq!(to_pretty_json(&json!({})).unwrap(), "{}");
        assert_eq!(to_pretty_json(&json!([])).unwrap(), "[]");
    }

    #[test]
    fn escapes_newlines() {
        let text = to_pretty_json(&json!("two\nlines")).unwrap();
        assert_eq!(text, "\"two\\nlines\"");
    }

    #[test]
    fn parses_back() {
        let value = json!({ "indexes": [{ "key": "name", "type": "WORD" }], "records": [] });
        let text = to_pretty_json(&value).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, value);
    }
}
