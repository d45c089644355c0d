//! Error types for findex core.

use crate::types::{IndexType, Match};
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in findex core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Snapshot store error.
    #[error("storage error: {0}")]
    Storage(#[from] findex_storage::StorageError),

    /// An index declaration or condition names a type the key transformer
    /// does not know.
    #[error("unknown index type: {name}")]
    UnknownIndexType {
        /// The type name as given.
        name: String,
    },

    /// The match operator needs an auxiliary structure this index type
    /// does not maintain.
    #[error("index type {index_type} has no structure for {match_kind} matches")]
    UnsupportedMatch {
        /// Type of the index the condition targets.
        index_type: IndexType,
        /// The requested operator.
        match_kind: Match,
    },

    /// A query node does not carry exactly one of condition, and, or.
    #[error("malformed query: {message}")]
    MalformedQuery {
        /// Description of the shape problem.
        message: String,
    },

    /// A wildcard pattern could not be parsed.
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// The pattern as given.
        pattern: String,
        /// Description of the syntax problem.
        message: String,
    },

    /// A snapshot does not have the expected layout.
    #[error("invalid snapshot format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },

    /// Operation not permitted with the current configuration.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Description of why the operation is invalid.
        message: String,
    },
}

impl CoreError {
    /// Creates an unknown index type error.
    pub fn unknown_index_type(name: impl Into<String>) -> Self {
        Self::UnknownIndexType { name: name.into() }
    }

    /// Creates an unsupported match error.
    pub fn unsupported_match(index_type: IndexType, match_kind: Match) -> Self {
        Self::UnsupportedMatch {
            index_type,
            match_kind,
        }
    }

    /// Creates a malformed query error.
    pub fn malformed_query(message: impl Into<String>) -> Self {
        Self::MalformedQuery {
            message: message.into(),
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }
}
