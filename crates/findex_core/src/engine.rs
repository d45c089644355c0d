//! Index Engine - declaration-driven ingestion and query evaluation.
//!
//! The engine keeps, per declared index:
//!
//! 1. An exact-match table from normalized key to the records filed under it
//! 2. An ordered set of decoded values (`NUMBER` and `DATE` only)
//! 3. A trie of keys (`WORD` and `TEXT` only)
//!
//! Queries never scan records. Every condition resolves to a set of exact
//! keys through one of the structures above and reads the records filed
//! under them; AND/OR nodes combine those sets by record identity.
//!
//! # Invariants
//!
//! - Every record is wrapped once per ingestion pass; all keys and indexes
//!   it is filed under share that one wrapper
//! - A record is filed at most once under a given key
//! - Raw records are retained verbatim so [`IndexEngine::re_index`] can
//!   rebuild every structure from scratch
//! - `find` returns each matching record once, in submission order

use crate::config::{EngineConfig, OrderedBackend};
use crate::error::{CoreError, CoreResult};
use crate::key;
use crate::levenshtein::{levenshtein, max_allowed_distance, max_allowed_distance_between};
use crate::ordered::{DateOrder, NumberOrder, OrderedSet, OrderedTree, SortedArray};
use crate::path;
use crate::pattern::Pattern;
use crate::query::{Condition, Query};
use crate::record::{RecordId, WrappedRecord};
use crate::trie::Trie;
use crate::types::{IndexDeclaration, IndexType, Match};
use chrono::NaiveDate;
use findex_storage::SnapshotStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Records matched so far, keyed by identity.
type Matches = HashMap<RecordId, Arc<WrappedRecord>>;

/// Decoded key values of an ordered index.
enum OrderedKeys {
    Number(Box<dyn OrderedSet<f64>>),
    Date(Box<dyn OrderedSet<NaiveDate>>),
}

impl OrderedKeys {
    fn for_type(index_type: IndexType, backend: OrderedBackend) -> Option<Self> {
        match index_type {
            IndexType::Number => Some(Self::Number(match backend {
                OrderedBackend::Tree => Box::new(OrderedTree::new(NumberOrder)),
                OrderedBackend::SortedArray => Box::new(SortedArray::new(NumberOrder)),
            })),
            IndexType::Date => Some(Self::Date(match backend {
                OrderedBackend::Tree => Box::new(OrderedTree::new(DateOrder::default())),
                OrderedBackend::SortedArray => Box::new(SortedArray::new(DateOrder::default())),
            })),
            IndexType::Word | IndexType::Text => None,
        }
    }

    fn insert_key(&mut self, key: &str) {
        match self {
            Self::Number(set) => {
                if let Some(n) = key::number_value(key) {
                    set.insert(n);
                }
            }
            Self::Date(set) => {
                if let Some(date) = key::date_value(key) {
                    set.insert(date);
                }
            }
        }
    }

    /// Exact keys of every value in range of `key`.
    fn range_keys(&self, key: &str, match_kind: Match) -> Vec<String> {
        match self {
            Self::Number(set) => key::number_value(key)
                .map(|n| select(&**set, &n, match_kind))
                .unwrap_or_default()
                .into_iter()
                .map(key::number_key)
                .collect(),
            Self::Date(set) => key::date_value(key)
                .map(|date| select(&**set, &date, match_kind))
                .unwrap_or_default()
                .into_iter()
                .map(key::date_key)
                .collect(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Number(set) => set.len(),
            Self::Date(set) => set.len(),
        }
    }
}

impl fmt::Debug for OrderedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Number(_) => "Number",
            Self::Date(_) => "Date",
        };
        f.debug_struct("OrderedKeys")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}

fn select<T>(set: &dyn OrderedSet<T>, reference: &T, match_kind: Match) -> Vec<T> {
    match match_kind {
        Match::Gt => set.greater_than(reference),
        Match::Gte => set.greater_than_or_equal(reference),
        Match::Lt => set.less_than(reference),
        Match::Lte => set.less_than_or_equal(reference),
        _ => Vec::new(),
    }
}

/// Structures maintained for one declared index.
#[derive(Debug)]
struct IndexState {
    exact: HashMap<String, Vec<Arc<WrappedRecord>>>,
    ordered: Option<OrderedKeys>,
    prefixed: Option<Trie>,
}

impl IndexState {
    fn new(index_type: IndexType, backend: OrderedBackend) -> Self {
        Self {
            exact: HashMap::new(),
            ordered: OrderedKeys::for_type(index_type, backend),
            prefixed: index_type.is_textual().then(Trie::new),
        }
    }

    /// Files a record under a key. New keys also enter the auxiliary
    /// structures.
    fn file(&mut self, key: String, record: &Arc<WrappedRecord>) {
        match self.exact.entry(key) {
            Entry::Occupied(mut entry) => {
                let bucket = entry.get_mut();
                // a record's keys are filed together, so a repeat is always last
                if bucket.last().is_some_and(|last| last.id() == record.id()) {
                    return;
                }
                bucket.push(Arc::clone(record));
            }
            Entry::Vacant(entry) => {
                if let Some(ordered) = &mut self.ordered {
                    ordered.insert_key(entry.key());
                }
                if let Some(trie) = &mut self.prefixed {
                    trie.insert(entry.key());
                }
                entry.insert(vec![Arc::clone(record)]);
            }
        }
    }

    /// Exact keys selected by a non-wildcard operator.
    fn matching_keys(
        &self,
        index: &IndexDeclaration,
        key: &str,
        match_kind: Match,
    ) -> CoreResult<Vec<String>> {
        let unsupported = || CoreError::unsupported_match(index.index_type, match_kind);

        Ok(match match_kind {
            Match::Eq => vec![key.to_owned()],
            range if range.is_range() => self
                .ordered
                .as_ref()
                .ok_or_else(unsupported)?
                .range_keys(key, match_kind),
            Match::Fuzzy => match &self.prefixed {
                Some(trie) => trie.find_fuzzy(key, max_allowed_distance(key)),
                None => self
                    .exact
                    .keys()
                    .filter(|candidate| {
                        levenshtein(key, candidate) <= max_allowed_distance_between(key, candidate)
                    })
                    .cloned()
                    .collect(),
            },
            Match::Prefix => self
                .prefixed
                .as_ref()
                .ok_or_else(unsupported)?
                .find_all_starting_with(key),
            _ => return Err(unsupported()),
        })
    }

    /// Records filed under any of `keys`.
    fn collect(&self, keys: &[String]) -> Matches {
        keys.iter()
            .filter_map(|k| self.exact.get(k))
            .flatten()
            .map(|record| (record.id(), Arc::clone(record)))
            .collect()
    }
}

/// Fails if the operator needs a structure the index type does not keep.
fn check_support(index_type: IndexType, match_kind: Match) -> CoreResult<()> {
    let supported = match match_kind {
        range if range.is_range() => index_type.is_ordered(),
        Match::Prefix | Match::Wildcard => index_type.is_textual(),
        _ => true,
    };
    if supported {
        Ok(())
    } else {
        Err(CoreError::unsupported_match(index_type, match_kind))
    }
}

/// Keeps only the records present in both sets.
fn intersect(mut acc: Matches, other: &Matches) -> Matches {
    acc.retain(|id, _| other.contains_key(id));
    acc
}

/// Declarations and raw records: everything needed to rebuild an engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Declared indexes in declaration order.
    #[serde(default)]
    pub indexes: Vec<IndexDeclaration>,
    /// Raw records in submission order.
    #[serde(default)]
    pub records: Vec<Value>,
}

/// Size of one index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// The declaration.
    pub index: IndexDeclaration,
    /// Distinct exact-match keys.
    pub keys: usize,
    /// Distinct values in the ordered set, if the type keeps one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_values: Option<usize>,
    /// Keys in the trie, if the type keeps one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trie_keys: Option<usize>,
}

/// Engine size summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Number of retained records.
    pub records: usize,
    /// Per-index sizes in declaration order.
    pub indexes: Vec<IndexStats>,
}

/// In-memory index and query engine.
///
/// # Example
///
/// ```rust
/// use findex_core::{Condition, IndexDeclaration, IndexEngine, Match, Query};
/// use serde_json::json;
///
/// let mut engine = IndexEngine::default();
/// engine
///     .add_index(IndexDeclaration::word("name"))
///     .add_index(IndexDeclaration::number("age"));
/// engine.add_data([
///     json!({ "name": "Alice", "age": 30 }),
///     json!({ "name": "Beat", "age": 25 }),
/// ]);
///
/// let query = Query::condition(
///     Condition::new(IndexDeclaration::number("age"), 28).with_match(Match::Gt),
/// );
/// let found = engine.find(&query).unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0]["name"], "Alice");
/// ```
#[derive(Debug, Default)]
pub struct IndexEngine {
    /// Configuration.
    config: EngineConfig,
    /// Declared indexes in declaration order.
    declarations: Vec<IndexDeclaration>,
    /// Raw records in submission order.
    records: Vec<Arc<Value>>,
    /// Per-index structures, created on the first key filed.
    indexes: HashMap<IndexDeclaration, IndexState>,
    /// Sequence number of the next wrapped record.
    next_sequence: u64,
}

impl IndexEngine {
    /// Creates an empty engine.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates an engine from a snapshot: declarations first, then records.
    #[must_use]
    pub fn from_snapshot(config: EngineConfig, snapshot: Snapshot) -> Self {
        let mut engine = Self::new(config);
        for declaration in snapshot.indexes {
            engine.add_index(declaration);
        }
        engine.add_data(snapshot.records);
        engine
    }

    /// Loads an engine from a snapshot store. An empty store yields an
    /// empty engine.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read or does not hold a snapshot.
    pub fn load(config: EngineConfig, store: &dyn SnapshotStore) -> CoreResult<Self> {
        let value = store.retrieve()?;
        let snapshot: Snapshot = serde_json::from_value(value)
            .map_err(|e| CoreError::invalid_format(e.to_string()))?;
        info!(
            indexes = snapshot.indexes.len(),
            records = snapshot.records.len(),
            "loading snapshot"
        );
        Ok(Self::from_snapshot(config, snapshot))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Declares an index.
    ///
    /// Records already ingested are not indexed until the next
    /// [`re_index`](Self::re_index). Declaring the same index twice is a
    /// no-op.
    pub fn add_index(&mut self, declaration: IndexDeclaration) -> &mut Self {
        if self.declarations.contains(&declaration) {
            debug!(index = %declaration, "index already declared");
        } else {
            debug!(index = %declaration, "declared index");
            self.declarations.push(declaration);
        }
        self
    }

    /// Ingests records into every declared index.
    ///
    /// Values that are missing or normalize to no keys are skipped for that
    /// index; ingestion itself never fails.
    pub fn add_data(&mut self, records: impl IntoIterator<Item = Value>) -> &mut Self {
        let before = self.records.len();
        for record in records {
            let record = Arc::new(record);
            self.ingest(&record);
            self.records.push(record);
        }
        debug!(
            added = self.records.len() - before,
            total = self.records.len(),
            "ingested records"
        );
        self
    }

    /// Discards every index structure and rebuilds from the retained
    /// records, in submission order, against the current declarations.
    pub fn re_index(&mut self) -> &mut Self {
        self.indexes.clear();
        self.next_sequence = 0;

        let records = std::mem::take(&mut self.records);
        for record in &records {
            self.ingest(record);
        }
        self.records = records;

        info!(
            indexes = self.declarations.len(),
            records = self.records.len(),
            "rebuilt indexes"
        );
        self
    }

    /// Returns the records matching a query, each once, in submission
    /// order.
    ///
    /// # Errors
    ///
    /// Fails if a condition uses an operator its index type cannot serve,
    /// carries a malformed wildcard pattern, or (with
    /// [`EngineConfig::strict_declarations`]) names an undeclared index.
    pub fn find(&self, query: &Query) -> CoreResult<Vec<Arc<Value>>> {
        let mut matched: Vec<Arc<WrappedRecord>> = self.evaluate(query)?.into_values().collect();
        matched.sort_unstable_by_key(|record| record.sequence());

        debug!(
            conditions = query.condition_count(),
            matches = matched.len(),
            "evaluated query"
        );
        Ok(matched
            .into_iter()
            .map(|record| Arc::clone(record.record()))
            .collect())
    }

    /// Returns the declared indexes in declaration order.
    #[must_use]
    pub fn indexes(&self) -> &[IndexDeclaration] {
        &self.declarations
    }

    /// Number of retained records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the retained records in submission order.
    #[must_use]
    pub fn records(&self) -> &[Arc<Value>] {
        &self.records
    }

    /// Summarizes index sizes.
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        let indexes = self
            .declarations
            .iter()
            .map(|index| {
                let state = self.indexes.get(index);
                IndexStats {
                    index: index.clone(),
                    keys: state.map_or(0, |s| s.exact.len()),
                    ordered_values: index
                        .index_type
                        .is_ordered()
                        .then(|| state.and_then(|s| s.ordered.as_ref()).map_or(0, OrderedKeys::len)),
                    trie_keys: index
                        .index_type
                        .is_textual()
                        .then(|| state.and_then(|s| s.prefixed.as_ref()).map_or(0, Trie::len)),
                }
            })
            .collect();

        EngineStats {
            records: self.records.len(),
            indexes,
        }
    }

    /// Captures declarations and raw records.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            indexes: self.declarations.clone(),
            records: self.records.iter().map(|r| Value::clone(r)).collect(),
        }
    }

    /// Writes a snapshot to a store.
    ///
    /// # Errors
    ///
    /// Fails if the snapshot cannot be encoded or the store cannot write.
    pub fn save(&self, store: &dyn SnapshotStore) -> CoreResult<()> {
        let value = serde_json::to_value(self.snapshot())
            .map_err(|e| CoreError::invalid_format(e.to_string()))?;
        store.store(&value)?;
        info!(
            indexes = self.declarations.len(),
            records = self.records.len(),
            "saved snapshot"
        );
        Ok(())
    }

    fn ingest(&mut self, record: &Arc<Value>) {
        let wrapped = Arc::new(WrappedRecord::new(self.next_sequence, Arc::clone(record)));
        self.next_sequence += 1;

        let backend = self.config.ordered_backend;
        for declaration in &self.declarations {
            let Some(field) = path::resolve(record, &declaration.key) else {
                continue;
            };
            let keys = key::transform(declaration.index_type, field);
            if keys.is_empty() {
                continue;
            }

            let state = self
                .indexes
                .entry(declaration.clone())
                .or_insert_with(|| IndexState::new(declaration.index_type, backend));
            for k in keys {
                state.file(k, &wrapped);
            }
        }
    }

    fn evaluate(&self, query: &Query) -> CoreResult<Matches> {
        match query {
            Query::Condition(condition) => self.evaluate_condition(condition),
            Query::And(operands) => {
                let mut operands = operands.iter();
                let Some(first) = operands.next() else {
                    return Ok(Matches::new());
                };
                let mut acc = self.evaluate(first)?;
                for operand in operands {
                    // evaluated even once empty, so later errors still surface
                    let next = self.evaluate(operand)?;
                    acc = intersect(acc, &next);
                }
                Ok(acc)
            }
            Query::Or(operands) => {
                let mut acc = Matches::new();
                for operand in operands {
                    acc.extend(self.evaluate(operand)?);
                }
                Ok(acc)
            }
        }
    }

    fn evaluate_condition(&self, condition: &Condition) -> CoreResult<Matches> {
        let Condition {
            index,
            value,
            match_kind,
        } = condition;
        let match_kind = *match_kind;

        check_support(index.index_type, match_kind)?;

        if !self.declarations.contains(index) {
            if self.config.strict_declarations {
                return Err(CoreError::invalid_operation(format!(
                    "no index declared for {index}"
                )));
            }
            warn!(index = %index, "condition on undeclared index");
            return Ok(Matches::new());
        }

        let key_sets = if match_kind == Match::Wildcard {
            let patterns = key::pattern_terms(index.index_type, value)
                .iter()
                .map(|term| Pattern::parse(term))
                .collect::<CoreResult<Vec<_>>>()?;
            let Some(trie) = self.indexes.get(index).and_then(|s| s.prefixed.as_ref()) else {
                return Ok(Matches::new());
            };
            if patterns.is_empty() {
                return Ok(Matches::new());
            }
            patterns.iter().map(|p| trie.find_matching(p)).collect::<Vec<_>>()
        } else {
            let keys = key::transform(index.index_type, value);
            let Some(state) = self.indexes.get(index) else {
                return Ok(Matches::new());
            };
            if keys.is_empty() {
                return Ok(Matches::new());
            }
            keys.iter()
                .map(|k| state.matching_keys(index, k, match_kind))
                .collect::<CoreResult<Vec<_>>>()?
        };

        let Some(state) = self.indexes.get(index) else {
            return Ok(Matches::new());
        };

        // every key of a multi-key value must match
        let mut key_sets = key_sets.iter();
        let mut acc = key_sets
            .next()
            .map(|keys| state.collect(keys))
            .unwrap_or_default();
        for keys in key_sets {
            if acc.is_empty() {
                break;
            }
            acc = intersect(acc, &state.collect(keys));
        }
        Ok(acc)
    }
}
