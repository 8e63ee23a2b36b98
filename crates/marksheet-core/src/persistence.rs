//! Line-oriented flat-file format for student records.
//!
//! ```text
//! <count>
//! <id>,<name>,<mark1>,<mark2>,<mark3>,<exam>
//! ```
//!
//! The count header is informational; readers take every well-formed data
//! line regardless of what it says. There is no escaping, so ids and names
//! never contain commas (see [`crate::model::Record::new`]).

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use crate::model::Record;
use crate::traits::{LoadReport, RecordRepository, SkipReason, SkippedLine};

/// Contents written when the data file does not exist yet.
pub const EMPTY_FILE: &str = "0\n";

/// Number of comma-separated fields in a data line.
pub const FIELDS_PER_LINE: usize = 6;

/// Parse a whole file. Never fails; bad rows end up in `skipped`.
pub fn parse_records(content: &str) -> LoadReport {
    let mut report = LoadReport::default();
    let mut lines = content.lines().enumerate();

    let Some((_, header)) = lines.next() else {
        return report;
    };
    report.declared_count = header.trim().parse().ok();

    let mut seen = HashSet::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;

        let parsed = parse_line(line).and_then(|record| {
            if seen.insert(record.id.clone()) {
                Ok(record)
            } else {
                Err(SkipReason::DuplicateId(record.id))
            }
        });

        match parsed {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                tracing::warn!("skipping line {line_number}: {reason}");
                report.skipped.push(SkippedLine {
                    line_number,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    report
}

/// Parse one data line into a record.
pub fn parse_line(line: &str) -> Result<Record, SkipReason> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    let [id, name, mark1, mark2, mark3, exam] = fields.as_slice() else {
        return Err(SkipReason::FieldCount(fields.len()));
    };

    let coursework = [parse_mark(mark1)?, parse_mark(mark2)?, parse_mark(mark3)?];
    let exam = parse_mark(exam)?;

    Record::new(*id, *name, coursework, exam).map_err(|_| SkipReason::EmptyField)
}

fn parse_mark(raw: &str) -> Result<u32, SkipReason> {
    let raw = raw.trim();
    raw.parse()
        .map_err(|_| SkipReason::InvalidMark(raw.to_string()))
}

/// Format one record as a data line (no trailing newline).
pub fn format_line(record: &Record) -> String {
    let [mark1, mark2, mark3] = record.coursework;
    format!(
        "{},{},{mark1},{mark2},{mark3},{}",
        record.id, record.name, record.exam
    )
}

/// Render the full file: count header then one line per record.
pub fn render_records(records: &[Record]) -> String {
    let mut out = format!("{}\n", records.len());
    for record in records {
        out.push_str(&format_line(record));
        out.push('\n');
    }
    out
}

/// Repository backed by a single data file.
///
/// Saves rewrite the file in place. A crash mid-write can truncate it.
#[derive(Debug, Clone)]
pub struct FlatFileRepository {
    path: PathBuf,
}

impl FlatFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write [`EMPTY_FILE`], creating parent directories as needed.
    fn create_empty(&self) -> Result<(), PersistenceError> {
        let create_err = |source| PersistenceError::Create {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(create_err)?;
        }
        fs::write(&self.path, EMPTY_FILE).map_err(create_err)?;
        tracing::info!("created empty data file {}", self.path.display());
        Ok(())
    }
}

impl RecordRepository for FlatFileRepository {
    fn load(&self) -> Result<LoadReport, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.create_empty()?;
                EMPTY_FILE.to_string()
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let report = parse_records(&content);
        tracing::info!(
            "loaded {} record(s) from {} ({} skipped)",
            report.records.len(),
            self.path.display(),
            report.skipped.len()
        );
        if report.count_mismatch() {
            tracing::warn!(
                "{} declares {} record(s) but {} were read",
                self.path.display(),
                report.declared_count.unwrap_or_default(),
                report.records.len()
            );
        }
        Ok(report)
    }

    fn save(&self, records: &[Record]) -> Result<(), PersistenceError> {
        fs::write(&self.path, render_records(records)).map_err(|source| {
            PersistenceError::Write {
                path: self.path.clone(),
                source,
            }
        })?;
        tracing::info!(
            "saved {} record(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
