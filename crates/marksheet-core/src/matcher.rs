//! Record selection predicates used by find, remove and update.

use crate::model::Record;

/// Selects records from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Exact, case-sensitive id match.
    Id(String),
    /// Case-insensitive substring of the name.
    NameContains(String),
    /// Either of the above. This is what free-text search uses.
    IdOrName(String),
}

impl Matcher {
    /// Matcher for a free-text query typed by the user.
    pub fn query(term: impl Into<String>) -> Self {
        Matcher::IdOrName(term.into())
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Matcher::Id(id) => record.id == *id,
            Matcher::NameContains(fragment) => name_contains(record, fragment),
            Matcher::IdOrName(term) => record.id == *term || name_contains(record, term),
        }
    }

    /// The text the matcher was built from.
    pub fn term(&self) -> &str {
        match self {
            Matcher::Id(s) | Matcher::NameContains(s) | Matcher::IdOrName(s) => s,
        }
    }
}

fn name_contains(record: &Record, fragment: &str) -> bool {
    record
        .name
        .to_lowercase()
        .contains(&fragment.to_lowercase())
}
