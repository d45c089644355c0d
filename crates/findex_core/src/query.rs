//! Query model.
//!
//! A query is a tree of AND/OR nodes over leaf conditions. Its JSON form
//! carries exactly one of `condition`, `and`, `or` per node:
//!
//! ```json
//! { "and": [
//!     { "condition": { "index": { "key": "age", "type": "NUMBER" }, "value": 30, "match": "GT" } },
//!     { "or": [
//!         { "condition": { "index": { "key": "name", "type": "WORD" }, "value": "Charlie" } }
//!     ] }
//! ] }
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::{IndexDeclaration, Match};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single comparison against one index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The index to look up.
    pub index: IndexDeclaration,
    /// Raw value, normalized with the index's key transformer before use.
    pub value: Value,
    /// Comparison operator; `EQ` when omitted.
    #[serde(rename = "match", default)]
    pub match_kind: Match,
}

impl Condition {
    /// Creates an equality condition.
    pub fn new(index: IndexDeclaration, value: impl Into<Value>) -> Self {
        Self {
            index,
            value: value.into(),
            match_kind: Match::Eq,
        }
    }

    /// Sets the comparison operator.
    #[must_use]
    pub fn with_match(mut self, match_kind: Match) -> Self {
        self.match_kind = match_kind;
        self
    }
}

/// A boolean query tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "Value")]
pub enum Query {
    /// A leaf comparison.
    Condition(Condition),
    /// Records matching every operand.
    And(Vec<Query>),
    /// Records matching any operand.
    Or(Vec<Query>),
}

const NODE_KINDS: [&str; 3] = ["condition", "and", "or"];

impl Query {
    /// Creates a leaf query.
    pub fn condition(condition: Condition) -> Self {
        Self::Condition(condition)
    }

    /// Creates an AND node.
    pub fn and(operands: impl IntoIterator<Item = Query>) -> Self {
        Self::And(operands.into_iter().collect())
    }

    /// Creates an OR node.
    pub fn or(operands: impl IntoIterator<Item = Query>) -> Self {
        Self::Or(operands.into_iter().collect())
    }

    /// Parses a query from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedQuery`] if the text is not JSON or a
    /// node does not carry exactly one of `condition`, `and`, `or`.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| CoreError::malformed_query(format!("not valid JSON: {e}")))?;
        Self::try_from(value)
    }

    /// Number of leaf conditions in the tree.
    #[must_use]
    pub fn condition_count(&self) -> usize {
        match self {
            Query::Condition(_) => 1,
            Query::And(operands) | Query::Or(operands) => {
                operands.iter().map(Query::condition_count).sum()
            }
        }
    }

    fn from_node(mut node: Map<String, Value>) -> CoreResult<Self> {
        let present: Vec<&str> = NODE_KINDS
            .into_iter()
            .filter(|kind| node.contains_key(*kind))
            .collect();

        let kind = match present.as_slice() {
            [kind] => *kind,
            [] => {
                return Err(CoreError::malformed_query(
                    "node has none of condition, and, or",
                ))
            }
            many => {
                return Err(CoreError::malformed_query(format!(
                    "node has more than one of condition, and, or: {}",
                    many.join(", ")
                )))
            }
        };
        let body = node.remove(kind).unwrap_or(Value::Null);
        if !node.is_empty() {
            let extra: Vec<&str> = node.keys().map(String::as_str).collect();
            return Err(CoreError::malformed_query(format!(
                "\"{kind}\" node has unexpected keys: {}",
                extra.join(", ")
            )));
        }

        if kind == "condition" {
            return serde_json::from_value(body)
                .map(Query::Condition)
                .map_err(|e| CoreError::malformed_query(format!("bad condition: {e}")));
        }

        let Value::Array(items) = body else {
            return Err(CoreError::malformed_query(format!(
                "\"{kind}\" must hold a list of queries"
            )));
        };
        let operands = items
            .into_iter()
            .map(Query::try_from)
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(if kind == "and" {
            Query::And(operands)
        } else {
            Query::Or(operands)
        })
    }
}

impl From<Condition> for Query {
    fn from(condition: Condition) -> Self {
        Query::Condition(condition)
    }
}

impl TryFrom<Value> for Query {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(node) => Self::from_node(node),
            other => Err(CoreError::malformed_query(format!(
                "query node must be an object, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn age_gt(n: i64) -> Query {
        Condition::new(IndexDeclaration::number("age"), n)
            .with_match(Match::Gt)
            .into()
    }

    #[test]
    fn condition_defaults_to_eq() {
        let query = Query::from_json(
            r#"{ "condition": { "index": { "key": "name", "type": "WORD" }, "value": "Alice" } }"#,
        )
        .unwrap();
        assert_eq!(
            query,
            Query::condition(Condition::new(IndexDeclaration::word("name"), "Alice"))
        );
    }

    #[test]
    fn symbolic_operators() {
        let query = Query::try_from(json!({
            "condition": { "index": { "key": "age", "type": "NUMBER" }, "value": 30, "match": ">" }
        }))
        .unwrap();
        assert_eq!(query, age_gt(30));
    }

    #[test]
    fn nested_tree() {
        let query = Query::try_from(json!({
            "and": [
                { "condition": { "index": { "key": "age", "type": "NUMBER" }, "value": 30, "match": "GT" } },
                { "or": [] }
            ]
        }))
        .unwrap();
        assert_eq!(query, Query::and([age_gt(30), Query::or([])]));
        assert_eq!(query.condition_count(), 1);
    }

    #[test]
    fn serializes_externally_tagged() {
        let value = serde_json::to_value(Query::or([age_gt(1)])).unwrap();
        assert_eq!(
            value,
            json!({ "or": [
                { "condition": { "index": { "key": "age", "type": "NUMBER" }, "value": 1, "match": "GT" } }
            ] })
        );
        let back: Query = serde_json::from_value(value).unwrap();
        assert_eq!(back, Query::or([age_gt(1)]));
    }

    #[test]
    fn rejects_node_with_two_kinds() {
        let err = Query::try_from(json!({ "and": [], "or": [] })).unwrap_err();
        assert!(matches!(err, CoreError::MalformedQuery { .. }));
    }

    #[test]
    fn rejects_node_with_extra_key() {
        let err = Query::try_from(json!({
            "condition": { "index": { "key": "name", "type": "WORD" }, "value": "Alice" },
            "orr": []
        }))
        .unwrap_err();
        assert!(matches!(err, CoreError::MalformedQuery { .. }));
        assert!(err.to_string().contains("orr"), "{err}");

        let nested = json!({ "or": [{ "and": [], "limit": 3 }] });
        assert!(Query::try_from(nested).is_err());
    }

    #[test]
    fn rejects_empty_node() {
        let err = Query::try_from(json!({})).unwrap_err();
        assert!(matches!(err, CoreError::MalformedQuery { .. }));
    }

    #[test]
    fn rejects_non_list_operands() {
        assert!(Query::try_from(json!({ "and": {} })).is_err());
        assert!(Query::try_from(json!(["and"])).is_err());
    }

    #[test]
    fn rejects_unknown_index_type() {
        let err = Query::try_from(json!({
            "condition": { "index": { "key": "age", "type": "GEO" }, "value": 1 }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("unknown index type"), "{err}");
    }

    #[test]
    fn rejects_bad_json_text() {
        assert!(matches!(
            Query::from_json("{ nope"),
            Err(CoreError::MalformedQuery { .. })
        ));
    }
}
