//! Error types for the record store and its persistence.
//!
//! Store errors mean a command was rejected and nothing changed. Persistence
//! errors mean the file could not be read or written; when one follows a
//! successful mutation, the in-memory store keeps the change.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::Field;

/// A store command was rejected. The store is left unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another record already uses this id.
    #[error("student id '{0}' already exists")]
    DuplicateId(String),

    /// A value could not be coerced into the field's type.
    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidValue {
        field: Field,
        value: String,
        reason: String,
    },

    /// Id and name must not be blank.
    #[error("{0} cannot be empty")]
    EmptyValue(Field),

    /// No record matched the query.
    #[error("no student matches '{0}'")]
    NotFound(String),

    /// More than one record matched where exactly one was required.
    #[error("'{query}' matches {matches} students, be more specific")]
    Ambiguous { query: String, matches: usize },
}

/// The backing file could not be read or written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors from the persisted store service.
#[derive(Debug, Error)]
pub enum MarksheetError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl MarksheetError {
    /// Returns `true` if the store accepted the change but the save failed.
    ///
    /// In that case memory and disk have diverged until the next successful save.
    pub fn is_persistence(&self) -> bool {
        matches!(self, MarksheetError::Persistence(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = StoreError::InvalidValue {
            field: Field::Exam,
            value: "abc".into(),
            reason: "marks must be whole numbers".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value 'abc' for exam: marks must be whole numbers"
        );
        assert_eq!(
            StoreError::DuplicateId("S1".into()).to_string(),
            "student id 'S1' already exists"
        );
        assert_eq!(StoreError::EmptyValue(Field::Name).to_string(), "name cannot be empty");
    }

    #[test]
    fn persistence_errors_are_flagged() {
        let err: MarksheetError = PersistenceError::Write {
            path: PathBuf::from("marks.txt"),
            source: io::Error::other("disk full"),
        }
        .into();
        assert!(err.is_persistence());
        assert!(err.to_string().contains("marks.txt"));

        let err: MarksheetError = StoreError::NotFound("x".into()).into();
        assert!(!err.is_persistence());
    }
}
