//! Storage seam between the store and wherever its records live.
//!
//! Implemented by [`crate::persistence::FlatFileRepository`] for the data
//! file and [`crate::memory::MemoryRepository`] for tests.

use crate::error::PersistenceError;
use crate::model::Record;

/// Loads and saves the full record collection.
pub trait RecordRepository {
    /// Read every well-formed record. Malformed rows are reported, not fatal.
    fn load(&self) -> Result<LoadReport, PersistenceError>;

    /// Replace the stored collection with `records`, in order.
    fn save(&self, records: &[Record]) -> Result<(), PersistenceError>;

    /// Human-readable location for messages (e.g. a file path).
    fn location(&self) -> String;
}

/// Outcome of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records in file order, ids unique.
    pub records: Vec<Record>,
    /// The count from the header line, if it parsed. Informational only.
    pub declared_count: Option<usize>,
    /// Data lines that were not loaded.
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    /// `true` when the header disagrees with the number of records loaded.
    pub fn count_mismatch(&self) -> bool {
        self.declared_count
            .is_some_and(|declared| declared != self.records.len())
    }
}

/// A data line that was skipped during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// One-based line number in the file.
    pub line_number: usize,
    pub content: String,
    pub reason: SkipReason,
}

/// Why a data line was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),

    #[error("mark '{0}' is not a non-negative whole number")]
    InvalidMark(String),

    #[error("id or name is empty")]
    EmptyField,

    #[error("id '{0}' already loaded")]
    DuplicateId(String),
}
