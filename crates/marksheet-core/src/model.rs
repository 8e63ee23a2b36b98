//! Core data model types for marksheet.
//!
//! A [`Record`] is one student's identity and marks. Totals, percentage and
//! grade are always derived from the stored marks, never stored themselves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Number of coursework marks per record.
pub const COURSEWORK_COMPONENTS: usize = 3;

/// Fixed denominator for percentages (three coursework marks plus the exam).
pub const MAX_OVERALL_TOTAL: u32 = 160;

/// One student's identity and marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique, case-sensitive student id.
    pub id: String,
    /// Display name. Not unique.
    pub name: String,
    /// The three coursework marks.
    pub coursework: [u32; COURSEWORK_COMPONENTS],
    /// Exam mark.
    pub exam: u32,
}

impl Record {
    /// Build a record, trimming and checking the id and name.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coursework: [u32; COURSEWORK_COMPONENTS],
        exam: u32,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            id: coerce_text(Field::Id, &id.into())?,
            name: coerce_text(Field::Name, &name.into())?,
            coursework,
            exam,
        })
    }

    /// Build a record from raw user input, coercing every mark.
    ///
    /// Fails on the first field that does not coerce; nothing is built.
    pub fn parse(
        id: &str,
        name: &str,
        coursework: [&str; COURSEWORK_COMPONENTS],
        exam: &str,
    ) -> Result<Self, StoreError> {
        let mut marks = [0; COURSEWORK_COMPONENTS];
        for (index, raw) in coursework.iter().enumerate() {
            marks[index] = coerce_mark(Field::Coursework(index), raw)?;
        }
        let exam = coerce_mark(Field::Exam, exam)?;
        Self::new(id, name, marks, exam)
    }

    /// Sum of the coursework marks, widened so large marks cannot overflow.
    pub fn coursework_total(&self) -> u64 {
        self.coursework.iter().map(|&mark| u64::from(mark)).sum()
    }

    pub fn overall_total(&self) -> u64 {
        self.coursework_total() + u64::from(self.exam)
    }

    /// Overall total scaled against [`MAX_OVERALL_TOTAL`].
    ///
    /// Marks are not capped, so this can exceed 100.
    pub fn percentage(&self) -> f64 {
        self.overall_total() as f64 / f64::from(MAX_OVERALL_TOTAL) * 100.0
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage())
    }

    /// Current value of `field`, rendered as text.
    pub fn value_of(&self, field: Field) -> String {
        match field {
            Field::Id => self.id.clone(),
            Field::Name => self.name.clone(),
            Field::Coursework(index) => self
                .coursework
                .get(index)
                .map(u32::to_string)
                .unwrap_or_default(),
            Field::Exam => self.exam.to_string(),
        }
    }

    /// Re-check id and name for records built without [`Record::new`].
    ///
    /// Returns the record with both trimmed.
    pub(crate) fn validated(self) -> Result<Self, StoreError> {
        Self::new(self.id, self.name, self.coursework, self.exam)
    }

    /// Overwrite one field with an already-coerced value.
    pub(crate) fn apply(&mut self, value: FieldValue) {
        match value {
            FieldValue::Id(id) => self.id = id,
            FieldValue::Name(name) => self.name = name,
            FieldValue::Coursework(index, mark) => self.coursework[index] = mark,
            FieldValue::Exam(mark) => self.exam = mark,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Letter grade derived from the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// Step function over fixed thresholds: 70, 60, 50, 40.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 70.0 {
            Grade::A
        } else if percentage >= 60.0 {
            Grade::B
        } else if percentage >= 50.0 {
            Grade::C
        } else if percentage >= 40.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// A single editable field of a [`Record`].
///
/// Coursework indices are zero-based internally and shown one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Coursework(usize),
    Exam,
}

impl Field {
    /// Coerce raw input into a value for this field.
    pub fn coerce(self, raw: &str) -> Result<FieldValue, StoreError> {
        match self {
            Field::Id => coerce_text(self, raw).map(FieldValue::Id),
            Field::Name => coerce_text(self, raw).map(FieldValue::Name),
            Field::Coursework(index) if index >= COURSEWORK_COMPONENTS => {
                Err(StoreError::InvalidValue {
                    field: self,
                    value: raw.to_string(),
                    reason: format!("there are only {COURSEWORK_COMPONENTS} coursework marks"),
                })
            }
            Field::Coursework(index) => {
                coerce_mark(self, raw).map(|mark| FieldValue::Coursework(index, mark))
            }
            Field::Exam => coerce_mark(self, raw).map(FieldValue::Exam),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Id => write!(f, "id"),
            Field::Name => write!(f, "name"),
            Field::Coursework(index) => write!(f, "coursework mark {}", index + 1),
            Field::Exam => write!(f, "exam"),
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" | "code" => Ok(Field::Id),
            "name" => Ok(Field::Name),
            "cw1" | "mark1" | "coursework1" => Ok(Field::Coursework(0)),
            "cw2" | "mark2" | "coursework2" => Ok(Field::Coursework(1)),
            "cw3" | "mark3" | "coursework3" => Ok(Field::Coursework(2)),
            "exam" => Ok(Field::Exam),
            other => Err(format!(
                "unknown field: {other} (expected id, name, cw1, cw2, cw3 or exam)"
            )),
        }
    }
}

/// A coerced value ready to be written into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Id(String),
    Name(String),
    Coursework(usize, u32),
    Exam(u32),
}

fn coerce_text(field: Field, raw: &str) -> Result<String, StoreError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(StoreError::EmptyValue(field));
    }
    // The data file has no escaping, so these would split the row on reload.
    if value.contains([',', '\n', '\r']) {
        return Err(StoreError::InvalidValue {
            field,
            value: value.to_string(),
            reason: "must not contain commas or line breaks".into(),
        });
    }
    Ok(value.to_string())
}

fn coerce_mark(field: Field, raw: &str) -> Result<u32, StoreError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| StoreError::InvalidValue {
            field,
            value: raw.to_string(),
            reason: "marks must be non-negative whole numbers".into(),
        })
}
