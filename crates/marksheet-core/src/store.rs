//! In-memory ordered record store.
//!
//! The store owns its records and keeps them in insertion order until a
//! [`Store::sort`] reorders them. Ids are unique; every operation that could
//! introduce a duplicate checks before mutating.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::matcher::Matcher;
use crate::model::{Field, FieldValue, Record};

/// Direction for [`Store::sort`], always by overall total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Lowest total first.
    Ascending,
    /// Highest total first.
    Descending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortOrder::Ascending),
            "descending" | "desc" => Ok(SortOrder::Descending),
            other => Err(format!(
                "unknown sort order: {other} (expected ascending or descending)"
            )),
        }
    }
}

/// How [`Store::remove`] treats a query that matches several records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovePolicy {
    /// Refuse with [`StoreError::Ambiguous`].
    RequireUnique,
    /// Remove the first match in store order.
    FirstMatch,
}

/// Result of a successful removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub record: Record,
    /// How many records matched the query, including the removed one.
    pub match_count: usize,
}

/// Result of a successful single-field update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// The record after the update.
    pub record: Record,
    pub field: Field,
    /// The field's value before the update.
    pub previous: String,
    /// How many records matched the target; the first was updated.
    pub match_count: usize,
}

/// Records sharing the highest or lowest overall total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing<'a> {
    pub total: u64,
    /// All tied records, in store order.
    pub records: Vec<&'a Record>,
}

/// Ordered collection of uniquely identified records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    records: Vec<Record>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records in order, rejecting the first duplicate id.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            store.add(record)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in store order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Append a record. Fails without mutating if the id is taken or the id
    /// or name would not survive a save.
    pub fn add(&mut self, record: Record) -> Result<(), StoreError> {
        let record = record.validated()?;
        if self.contains_id(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    /// Matching records in store order.
    ///
    /// The iterator is lazy and borrows the store, so each call sees the
    /// current contents.
    pub fn find<'a>(&'a self, matcher: &'a Matcher) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| matcher.matches(r))
    }

    pub fn count(&self, matcher: &Matcher) -> usize {
        self.find(matcher).count()
    }

    /// Remove one matching record according to `policy`.
    pub fn remove(
        &mut self,
        matcher: &Matcher,
        policy: RemovePolicy,
    ) -> Result<Removal, StoreError> {
        let match_count = self.count(matcher);
        let index = self
            .first_index(matcher)
            .ok_or_else(|| StoreError::NotFound(matcher.term().to_string()))?;

        if match_count > 1 && policy == RemovePolicy::RequireUnique {
            return Err(StoreError::Ambiguous {
                query: matcher.term().to_string(),
                matches: match_count,
            });
        }

        let record = self.records.remove(index);
        Ok(Removal {
            record,
            match_count,
        })
    }

    /// Records tied for the highest overall total, or `None` if empty.
    pub fn highest(&self) -> Option<Standing<'_>> {
        let total = self.records.iter().map(Record::overall_total).max()?;
        Some(self.standing(total))
    }

    /// Records tied for the lowest overall total, or `None` if empty.
    pub fn lowest(&self) -> Option<Standing<'_>> {
        let total = self.records.iter().map(Record::overall_total).min()?;
        Some(self.standing(total))
    }

    /// Stable in-place sort by overall total.
    ///
    /// Returns `false` and does nothing when the store is empty.
    pub fn sort(&mut self, order: SortOrder) -> bool {
        if self.records.is_empty() {
            return false;
        }
        match order {
            SortOrder::Ascending => self.records.sort_by_key(Record::overall_total),
            SortOrder::Descending => self
                .records
                .sort_by(|a, b| b.overall_total().cmp(&a.overall_total())),
        }
        true
    }

    /// Coerce `raw` into `field` and write it into the first matching record.
    ///
    /// On any failure the record is unchanged.
    pub fn update(
        &mut self,
        matcher: &Matcher,
        field: Field,
        raw: &str,
    ) -> Result<Update, StoreError> {
        let match_count = self.count(matcher);
        let index = self
            .first_index(matcher)
            .ok_or_else(|| StoreError::NotFound(matcher.term().to_string()))?;

        let value = field.coerce(raw)?;
        if let FieldValue::Id(new_id) = &value {
            let taken = self
                .records
                .iter()
                .enumerate()
                .any(|(i, r)| i != index && r.id == *new_id);
            if taken {
                return Err(StoreError::DuplicateId(new_id.clone()));
            }
        }

        let record = &mut self.records[index];
        let previous = record.value_of(field);
        record.apply(value);

        Ok(Update {
            record: record.clone(),
            field,
            previous,
            match_count,
        })
    }

    fn first_index(&self, matcher: &Matcher) -> Option<usize> {
        self.records.iter().position(|r| matcher.matches(r))
    }

    fn standing(&self, total: u64) -> Standing<'_> {
        Standing {
            total,
            records: self
                .records
                .iter()
                .filter(|r| r.overall_total() == total)
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, coursework: [u32; 3], exam: u32) -> Record {
        Record::new(id, name, coursework, exam).unwrap()
    }

    fn sample() -> Store {
        Store::from_records(vec![
            record("S1", "Ann", [10, 10, 10], 20),
            record("S2", "Bob", [20, 20, 20], 60),
            record("S3", "Annie", [5, 5, 5], 10),
            record("S4", "Cy", [20, 20, 20], 60),
        ])
        .unwrap()
    }

    fn ids(store: &Store) -> Vec<&str> {
        store.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn add_rejects_unsavable_literal_records() {
        let mut store = sample();
        let blank_id = Record {
            id: "".into(),
            name: "Dee".into(),
            coursework: [1, 1, 1],
            exam: 1,
        };
        assert!(matches!(
            store.add(blank_id),
            Err(StoreError::EmptyValue(Field::Id))
        ));

        let comma_name = Record {
            id: "S5".into(),
            name: "Smith, Ann".into(),
            coursework: [1, 1, 1],
            exam: 1,
        };
        assert!(matches!(
            store.add(comma_name),
            Err(StoreError::InvalidValue {
                field: Field::Name,
                ..
            })
        ));
        assert_eq!(store.len(), 4);

        let padded = Record {
            id: " S5 ".into(),
            name: "Dee".into(),
            coursework: [1, 1, 1],
            exam: 1,
        };
        store.add(padded).unwrap();
        assert!(store.contains_id("S5"));
    }

    #[test]
    fn large_marks_rank_and_sort_without_overflow() {
        let mut store = sample();
        store
            .add(Record::parse("S9", "Big", ["4294967295", "1", "0"], "0").unwrap())
            .unwrap();

        let high = store.highest().unwrap();
        assert_eq!(high.total, u64::from(u32::MAX) + 1);
        assert_eq!(high.records[0].id, "S9");
        assert_eq!(store.lowest().unwrap().total, 25);

        store.sort(SortOrder::Descending);
        assert_eq!(ids(&store), ["S9", "S2", "S4", "S1", "S3"]);
    }

    #[test]
    fn add_preserves_order_and_rejects_duplicates() {
        let mut store = sample();
        store.add(record("S5", "Dee", [1, 1, 1], 1)).unwrap();
        assert_eq!(ids(&store), ["S1", "S2", "S3", "S4", "S5"]);

        let err = store.add(record("S2", "Other", [0, 0, 0], 0)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id == "S2"));
        assert_eq!(store.len(), 5);
        assert_eq!(store.get("S2").unwrap().name, "Bob");
    }

    #[test]
    fn ids_are_case_sensitive() {
        let mut store = sample();
        store.add(record("s1", "Lower", [0, 0, 0], 0)).unwrap();
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn find_is_lazy_and_restartable() {
        let mut store = sample();
        let matcher = Matcher::query("ann");
        let found: Vec<_> = store.find(&matcher).map(|r| r.id.clone()).collect();
        assert_eq!(found, ["S1", "S3"]);

        store.add(record("S9", "Joanna", [0, 0, 0], 0)).unwrap();
        assert_eq!(store.find(&matcher).count(), 3);
        assert_eq!(store.count(&Matcher::Id("S4".into())), 1);
        assert_eq!(store.count(&Matcher::query("zed")), 0);
    }

    #[test]
    fn remove_unique_match() {
        let mut store = sample();
        let removal = store
            .remove(&Matcher::query("bob"), RemovePolicy::RequireUnique)
            .unwrap();
        assert_eq!(removal.record.id, "S2");
        assert_eq!(removal.match_count, 1);
        assert_eq!(ids(&store), ["S1", "S3", "S4"]);
    }

    #[test]
    fn remove_ambiguous_requires_policy() {
        let mut store = sample();
        let err = store
            .remove(&Matcher::query("ann"), RemovePolicy::RequireUnique)
            .unwrap_err();
        assert!(matches!(err, StoreError::Ambiguous { matches: 2, .. }));
        assert_eq!(store.len(), 4);

        let removal = store
            .remove(&Matcher::query("ann"), RemovePolicy::FirstMatch)
            .unwrap();
        assert_eq!(removal.record.id, "S1");
        assert_eq!(removal.match_count, 2);
        assert_eq!(ids(&store), ["S2", "S3", "S4"]);
    }

    #[test]
    fn remove_missing() {
        let mut store = sample();
        let err = store
            .remove(&Matcher::Id("S99".into()), RemovePolicy::FirstMatch)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(q) if q == "S99"));
    }

    #[test]
    fn highest_and_lowest_return_all_ties() {
        let store = sample();
        let high = store.highest().unwrap();
        assert_eq!(high.total, 120);
        let high_ids: Vec<_> = high.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(high_ids, ["S2", "S4"]);

        let low = store.lowest().unwrap();
        assert_eq!(low.total, 25);
        assert_eq!(low.records.len(), 1);
        assert_eq!(low.records[0].id, "S3");

        for r in &store {
            assert!(high.total >= r.overall_total());
            assert!(r.overall_total() >= low.total);
        }
    }

    #[test]
    fn empty_store_reports_no_data() {
        let mut store = Store::new();
        assert!(store.highest().is_none());
        assert!(store.lowest().is_none());
        assert!(!store.sort(SortOrder::Ascending));
        assert!(store.is_empty());
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let mut store = sample();
        assert!(store.sort(SortOrder::Descending));
        assert_eq!(ids(&store), ["S2", "S4", "S1", "S3"]);

        assert!(store.sort(SortOrder::Ascending));
        assert_eq!(ids(&store), ["S3", "S1", "S2", "S4"]);
    }

    #[test]
    fn opposite_sorts_reverse_distinct_totals() {
        let mut store = Store::from_records(vec![
            record("A", "A", [1, 0, 0], 0),
            record("B", "B", [9, 0, 0], 0),
            record("C", "C", [4, 0, 0], 0),
            record("D", "D", [7, 0, 0], 0),
        ])
        .unwrap();
        store.sort(SortOrder::Ascending);
        let ascending: Vec<String> = store.iter().map(|r| r.id.clone()).collect();
        store.sort(SortOrder::Descending);
        let mut descending: Vec<String> = store.iter().map(|r| r.id.clone()).collect();
        descending.reverse();
        assert_eq!(ascending, descending);
        assert_eq!(ascending, ["A", "C", "D", "B"]);
    }

    #[test]
    fn update_mark_and_name() {
        let mut store = sample();
        let update = store
            .update(&Matcher::Id("S1".into()), Field::Exam, "45")
            .unwrap();
        assert_eq!(update.previous, "20");
        assert_eq!(update.record.exam, 45);
        assert_eq!(store.get("S1").unwrap().overall_total(), 75);

        store
            .update(&Matcher::Id("S1".into()), Field::Name, "  Ann B ")
            .unwrap();
        assert_eq!(store.get("S1").unwrap().name, "Ann B");
    }

    #[test]
    fn update_first_of_several_matches() {
        let mut store = sample();
        let update = store
            .update(&Matcher::query("ann"), Field::Coursework(0), "0")
            .unwrap();
        assert_eq!(update.match_count, 2);
        assert_eq!(update.record.id, "S1");
        assert_eq!(store.get("S3").unwrap().coursework[0], 5);
    }

    #[test]
    fn invalid_update_leaves_record_unchanged() {
        let mut store = sample();
        let before = store.clone();

        let err = store
            .update(&Matcher::Id("S1".into()), Field::Coursework(1), "ten")
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidValue { .. }));

        let err = store
            .update(&Matcher::Id("S1".into()), Field::Id, "S2")
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(_)));

        let err = store
            .update(&Matcher::Id("S1".into()), Field::Name, "")
            .unwrap_err();
        assert!(matches!(err, StoreError::EmptyValue(Field::Name)));

        assert_eq!(store, before);
    }

    #[test]
    fn update_id_to_itself_is_allowed() {
        let mut store = sample();
        store
            .update(&Matcher::Id("S1".into()), Field::Id, "S1")
            .unwrap();
        let update = store
            .update(&Matcher::Id("S1".into()), Field::Id, "S100")
            .unwrap();
        assert_eq!(update.previous, "S1");
        assert!(store.contains_id("S100"));
        assert!(!store.contains_id("S1"));
    }

    #[test]
    fn sort_order_parse() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!(
            "Descending".parse::<SortOrder>().unwrap(),
            SortOrder::Descending
        );
        assert!("up".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::Ascending.to_string(), "ascending");
    }
}
