//! Persisted store: a [`Store`] mirrored to a [`RecordRepository`].
//!
//! Every successful mutation is followed by a full save. If the save fails
//! the mutation stays in memory and the error is returned; nothing is rolled
//! back or retried.

use crate::error::MarksheetError;
use crate::matcher::Matcher;
use crate::model::{Field, Record};
use crate::store::{RemovePolicy, Removal, SortOrder, Store, Update};
use crate::traits::{RecordRepository, SkippedLine};

/// The store plus the repository it is saved to.
pub struct Marksheet<R: RecordRepository> {
    store: Store,
    repo: R,
    skipped: Vec<SkippedLine>,
}

impl<R: RecordRepository> Marksheet<R> {
    /// Load the repository into a fresh store.
    pub fn open(repo: R) -> Result<Self, MarksheetError> {
        let report = repo.load()?;
        let store = Store::from_records(report.records)?;
        Ok(Self {
            store,
            repo,
            skipped: report.skipped,
        })
    }

    /// Read access for queries (find, highest, lowest, iteration).
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lines the last load skipped.
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn add(&mut self, record: Record) -> Result<(), MarksheetError> {
        let label = record.to_string();
        self.store.add(record)?;
        tracing::info!("added {label}");
        self.save()
    }

    pub fn remove(
        &mut self,
        matcher: &Matcher,
        policy: RemovePolicy,
    ) -> Result<Removal, MarksheetError> {
        let removal = self.store.remove(matcher, policy)?;
        tracing::info!(
            "removed {} ({} match(es) for '{}')",
            removal.record,
            removal.match_count,
            matcher.term()
        );
        self.save()?;
        Ok(removal)
    }

    pub fn update(
        &mut self,
        matcher: &Matcher,
        field: Field,
        raw: &str,
    ) -> Result<Update, MarksheetError> {
        let update = self.store.update(matcher, field, raw)?;
        tracing::info!(
            "updated {} of {}: '{}' -> '{}'",
            update.field,
            update.record,
            update.previous,
            update.record.value_of(field)
        );
        self.save()?;
        Ok(update)
    }

    /// Sort and save. Returns `Ok(false)` without saving when empty.
    pub fn sort(&mut self, order: SortOrder) -> Result<bool, MarksheetError> {
        if !self.store.sort(order) {
            tracing::debug!("sort skipped, no records");
            return Ok(false);
        }
        tracing::info!("sorted {} record(s) {order}", self.store.len());
        self.save()?;
        Ok(true)
    }

    /// Write the current store to the repository.
    pub fn save(&self) -> Result<(), MarksheetError> {
        self.repo.save(self.store.records()).map_err(|e| {
            tracing::warn!(
                "in-memory records not saved to {}: {e}",
                self.repo.location()
            );
            e.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemoryRepository;

    fn record(id: &str, name: &str, coursework: [u32; 3], exam: u32) -> Record {
        Record::new(id, name, coursework, exam).unwrap()
    }

    fn opened() -> Marksheet<MemoryRepository> {
        let repo = MemoryRepository::with_records(vec![
            record("S1", "Ann", [10, 10, 10], 20),
            record("S2", "Bob", [20, 20, 20], 60),
        ]);
        Marksheet::open(repo).unwrap()
    }

    #[test]
    fn open_loads_records() {
        let sheet = opened();
        assert_eq!(sheet.store().len(), 2);
        assert!(sheet.skipped().is_empty());
        assert_eq!(sheet.repository().save_count(), 0);
    }

    #[test]
    fn every_mutation_saves() {
        let mut sheet = opened();
        sheet.add(record("S3", "Cy", [1, 1, 1], 1)).unwrap();
        assert_eq!(sheet.repository().save_count(), 1);
        assert_eq!(sheet.repository().saved().len(), 3);

        sheet
            .update(&Matcher::Id("S3".into()), Field::Exam, "50")
            .unwrap();
        assert_eq!(sheet.repository().saved()[2].exam, 50);

        sheet.sort(SortOrder::Descending).unwrap();
        assert_eq!(sheet.repository().saved()[0].id, "S2");

        sheet
            .remove(&Matcher::Id("S1".into()), RemovePolicy::RequireUnique)
            .unwrap();
        assert_eq!(sheet.repository().save_count(), 4);
        assert_eq!(sheet.repository().saved(), sheet.store().records());
    }

    #[test]
    fn rejected_commands_do_not_save() {
        let mut sheet = opened();
        let err = sheet.add(record("S1", "Again", [0, 0, 0], 0)).unwrap_err();
        assert!(matches!(err, MarksheetError::Store(StoreError::DuplicateId(_))));

        let err = sheet
            .update(&Matcher::Id("S1".into()), Field::Exam, "x")
            .unwrap_err();
        assert!(!err.is_persistence());
        assert_eq!(sheet.repository().save_count(), 0);
    }

    #[test]
    fn sorting_empty_sheet_is_a_no_op() {
        let mut sheet = Marksheet::open(MemoryRepository::new()).unwrap();
        assert!(!sheet.sort(SortOrder::Ascending).unwrap());
        assert_eq!(sheet.repository().save_count(), 0);
    }

    #[test]
    fn failed_save_keeps_memory_state() {
        let mut sheet = opened();
        sheet.repository().set_fail_writes(true);

        let err = sheet.add(record("S3", "Cy", [1, 1, 1], 1)).unwrap_err();
        assert!(err.is_persistence());
        assert!(sheet.store().contains_id("S3"));
        assert_eq!(sheet.repository().saved().len(), 2);

        sheet.repository().set_fail_writes(false);
        sheet.save().unwrap();
        assert_eq!(sheet.repository().saved().len(), 3);
    }
}
