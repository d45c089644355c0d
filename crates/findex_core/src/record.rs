//! Record identifiers and wrapped records.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier minted for a record when it is ingested.
///
/// Record IDs are 128-bit random UUIDs:
/// - Unique with overwhelming probability across the process lifetime
/// - Assigned once per ingestion pass (a rebuild mints new ones)
/// - Shared by every key the record is filed under
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId([u8; 16]);

impl RecordId {
    /// Creates a new random record ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().into_bytes())
    }

    /// Creates a record ID from raw bytes.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes of this ID.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({self})")
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Uuid::from_bytes(self.0).hyphenated())
    }
}

/// A caller-supplied record tagged with its ingestion identity.
///
/// One `WrappedRecord` exists per record per ingestion pass; every key and
/// index the record is filed under holds an `Arc` to the same instance.
#[derive(Debug)]
pub struct WrappedRecord {
    id: RecordId,
    sequence: u64,
    record: Arc<Value>,
}

impl WrappedRecord {
    pub(crate) fn new(sequence: u64, record: Arc<Value>) -> Self {
        Self {
            id: RecordId::new(),
            sequence,
            record,
        }
    }

    /// Returns the record's identifier.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the position of the record in submission order.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the shared record.
    #[must_use]
    pub fn record(&self) -> &Arc<Value> {
        &self.record
    }
}
