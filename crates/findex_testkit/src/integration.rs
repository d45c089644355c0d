//! Cross-crate integration test helpers.
//!
//! [`QueryOracle`] answers queries by scanning every record and comparing
//! keys one by one, with none of the engine's auxiliary structures. It
//! only resolves top-level field names.

use findex_core::key;
use findex_core::levenshtein::{levenshtein, max_allowed_distance, max_allowed_distance_between};
use findex_core::{Condition, IndexDeclaration, IndexEngine, IndexType, Match, Query, Trie};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

/// Brute-force reference implementation of `find`.
#[derive(Debug, Clone)]
pub struct QueryOracle {
    declarations: Vec<IndexDeclaration>,
    records: Vec<Arc<Value>>,
}

impl QueryOracle {
    /// Creates an oracle over the given declarations and records.
    pub fn new(declarations: Vec<IndexDeclaration>, records: Vec<Arc<Value>>) -> Self {
        Self {
            declarations,
            records,
        }
    }

    /// Creates an oracle over the same declarations and records as an engine.
    pub fn from_engine(engine: &IndexEngine) -> Self {
        Self::new(engine.indexes().to_vec(), engine.records().to_vec())
    }

    /// Records matching the query, in submission order.
    ///
    /// Panics on a malformed wildcard pattern.
    pub fn find(&self, query: &Query) -> Vec<Arc<Value>> {
        self.records
            .iter()
            .filter(|record| self.matches(record, query))
            .cloned()
            .collect()
    }

    fn matches(&self, record: &Value, query: &Query) -> bool {
        match query {
            Query::Condition(condition) => self.matches_condition(record, condition),
            Query::And(operands) => {
                !operands.is_empty() && operands.iter().all(|q| self.matches(record, q))
            }
            Query::Or(operands) => operands.iter().any(|q| self.matches(record, q)),
        }
    }

    fn matches_condition(&self, record: &Value, condition: &Condition) -> bool {
        let index = &condition.index;
        if !self.declarations.contains(index) {
            return false;
        }

        let record_keys = record
            .get(&index.key)
            .map(|field| key::transform(index.index_type, field))
            .unwrap_or_default();

        let query_keys = if condition.match_kind == Match::Wildcard {
            key::pattern_terms(index.index_type, &condition.value)
        } else {
            key::transform(index.index_type, &condition.value)
        };

        !query_keys.is_empty()
            && query_keys.iter().all(|q| {
                record_keys
                    .iter()
                    .any(|k| key_matches(index.index_type, condition.match_kind, q, k))
            })
    }
}

fn key_matches(index_type: IndexType, match_kind: Match, query: &str, candidate: &str) -> bool {
    match match_kind {
        Match::Eq => query == candidate,
        Match::Gt | Match::Gte | Match::Lt | Match::Lte => {
            let Some(ordering) = compare_keys(index_type, candidate, query) else {
                return false;
            };
            match match_kind {
                Match::Gt => ordering == Ordering::Greater,
                Match::Gte => ordering != Ordering::Less,
                Match::Lt => ordering == Ordering::Less,
                _ => ordering != Ordering::Greater,
            }
        }
        Match::Fuzzy => {
            let allowed = if index_type.is_textual() {
                max_allowed_distance(query)
            } else {
                max_allowed_distance_between(query, candidate)
            };
            levenshtein(query, candidate) <= allowed
        }
        Match::Prefix => candidate.starts_with(query),
        Match::Wildcard => {
            let mut single = Trie::new();
            single.insert(candidate);
            !single
                .find_all_matching(query)
                .expect("Invalid pattern")
                .is_empty()
        }
    }
}

fn compare_keys(index_type: IndexType, a: &str, b: &str) -> Option<Ordering> {
    match index_type {
        IndexType::Number => Some(key::number_value(a)?.total_cmp(&key::number_value(b)?)),
        IndexType::Date => Some(key::date_value(a)?.cmp(&key::date_value(b)?)),
        IndexType::Word | IndexType::Text => None,
    }
}

/// Asserts that the engine and the oracle agree on a query.
pub fn assert_agrees(engine: &IndexEngine, query: &Query) {
    let actual = engine.find(query).expect("Query failed");
    let expected = QueryOracle::from_engine(engine).find(query);
    assert_eq!(actual, expected, "engine and oracle disagree on {query:?}");
}
