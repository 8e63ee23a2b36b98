//! marksheet-core — Student records, grading, and flat-file persistence.
//!
//! This crate defines the record model, the in-memory store with its queries,
//! and the line-oriented file format the store is mirrored to after every
//! change. The presentation layer (`marksheet-cli`) only talks to these types.

pub mod config;
pub mod error;
pub mod marksheet;
pub mod matcher;
pub mod memory;
pub mod model;
pub mod persistence;
pub mod store;
pub mod summary;
pub mod traits;
