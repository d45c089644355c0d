//! Core type definitions for findex.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The declared type of an indexed field.
///
/// The type decides how raw values are normalized into keys and which
/// auxiliary structures are kept next to the exact-match table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum IndexType {
    /// A single case-insensitive token (names, tags, identifiers).
    Word,
    /// Free text split into lower-case words.
    Text,
    /// A numeric value.
    Number,
    /// A calendar date at day granularity.
    Date,
}

impl IndexType {
    /// All recognized index types.
    pub const ALL: [IndexType; 4] = [
        IndexType::Word,
        IndexType::Text,
        IndexType::Number,
        IndexType::Date,
    ];

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IndexType::Word => "WORD",
            IndexType::Text => "TEXT",
            IndexType::Number => "NUMBER",
            IndexType::Date => "DATE",
        }
    }

    /// Whether keys of this type are kept in an ordered set for range matches.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, IndexType::Number | IndexType::Date)
    }

    /// Whether keys of this type are kept in a trie for text matches.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, IndexType::Word | IndexType::Text)
    }
}

impl FromStr for IndexType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndexType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::unknown_index_type(s))
    }
}

impl TryFrom<String> for IndexType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a condition's value is compared against indexed keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Match {
    /// Exact key equality.
    #[default]
    #[serde(rename = "EQ", alias = "=", alias = "eq")]
    Eq,
    /// Strictly greater than.
    #[serde(rename = "GT", alias = ">", alias = "gt")]
    Gt,
    /// Strictly less than.
    #[serde(rename = "LT", alias = "<", alias = "lt")]
    Lt,
    /// Greater than or equal to.
    #[serde(rename = "GTE", alias = ">=", alias = "gte")]
    Gte,
    /// Less than or equal to.
    #[serde(rename = "LTE", alias = "<=", alias = "lte")]
    Lte,
    /// Within a length-dependent edit distance.
    #[serde(rename = "FUZZY", alias = "fuzzy")]
    Fuzzy,
    /// Key starts with the value.
    #[serde(rename = "PREFIX", alias = "prefix")]
    Prefix,
    /// Key matches the value as a wildcard pattern.
    #[serde(rename = "WILDCARD", alias = "wildcard")]
    Wildcard,
}

impl Match {
    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Match::Eq => "EQ",
            Match::Gt => "GT",
            Match::Lt => "LT",
            Match::Gte => "GTE",
            Match::Lte => "LTE",
            Match::Fuzzy => "FUZZY",
            Match::Prefix => "PREFIX",
            Match::Wildcard => "WILDCARD",
        }
    }

    /// Whether this is one of the four range operators.
    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(self, Match::Gt | Match::Lt | Match::Gte | Match::Lte)
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed field selected for indexing.
///
/// `key` is a field path: dot-separated segments, where a numeric segment or
/// a `[n]` suffix indexes into an array (`"address.city"`, `"tags[0]"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexDeclaration {
    /// Field path inside each record.
    pub key: String,
    /// Declared type of the field.
    #[serde(rename = "type")]
    pub index_type: IndexType,
}

impl IndexDeclaration {
    /// Creates a new declaration.
    pub fn new(key: impl Into<String>, index_type: IndexType) -> Self {
        Self {
            key: key.into(),
            index_type,
        }
    }

    /// Declares a `WORD` index on the given path.
    pub fn word(key: impl Into<String>) -> Self {
        Self::new(key, IndexType::Word)
    }

    /// Declares a `TEXT` index on the given path.
    pub fn text(key: impl Into<String>) -> Self {
        Self::new(key, IndexType::Text)
    }

    /// Declares a `NUMBER` index on the given path.
    pub fn number(key: impl Into<String>) -> Self {
        Self::new(key, IndexType::Number)
    }

    /// Declares a `DATE` index on the given path.
    pub fn date(key: impl Into<String>) -> Self {
        Self::new(key, IndexType::Date)
    }
}

impl fmt::Display for IndexDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.index_type)
    }
}

impl FromStr for IndexDeclaration {
    type Err = CoreError;

    /// Parses the `path:TYPE` form used on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, index_type) = s.rsplit_once(':').ok_or_else(|| {
            CoreError::invalid_operation(format!("expected <path>:<TYPE>, got {s:?}"))
        })?;
        if key.is_empty() {
            return Err(CoreError::invalid_operation(format!(
                "empty field path in {s:?}"
            )));
        }
        Ok(Self::new(key, index_type.parse()?))
    }
}
