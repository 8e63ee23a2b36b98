//! In-memory repository for testing.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use crate::error::PersistenceError;
use crate::model::Record;
use crate::traits::{LoadReport, RecordRepository};

/// A repository that keeps its records in memory.
///
/// Counts saves and can be switched into a failing mode to exercise the
/// save-error path without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: Mutex<Vec<Record>>,
    save_count: AtomicU32,
    fail_writes: AtomicBool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `records` already stored.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Snapshot of what was last saved.
    pub fn saved(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u32 {
        self.save_count.load(Ordering::Relaxed)
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }
}

impl RecordRepository for MemoryRepository {
    fn load(&self) -> Result<LoadReport, PersistenceError> {
        let records = self.saved();
        Ok(LoadReport {
            declared_count: Some(records.len()),
            records,
            skipped: Vec::new(),
        })
    }

    fn save(&self, records: &[Record]) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(PersistenceError::Write {
                path: PathBuf::from(self.location()),
                source: io::Error::other("simulated write failure"),
            });
        }
        *self.records.lock().unwrap() = records.to_vec();
        self.save_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
