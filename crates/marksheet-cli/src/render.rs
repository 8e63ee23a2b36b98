//! Table and JSON rendering of records.

use std::str::FromStr;

use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};
use serde::Serialize;

use marksheet_core::model::{Grade, Record};

/// How command output is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Format::Table),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format: {other} (expected table or json)")),
        }
    }
}

/// A record with its derived scores, as shown to the user.
#[derive(Debug, Serialize)]
pub struct RecordView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub coursework: [u32; 3],
    pub coursework_total: u64,
    pub exam: u32,
    pub overall_total: u64,
    pub percentage: f64,
    pub grade: Grade,
}

impl<'a> From<&'a Record> for RecordView<'a> {
    fn from(r: &'a Record) -> Self {
        Self {
            id: &r.id,
            name: &r.name,
            coursework: r.coursework,
            coursework_total: r.coursework_total(),
            exam: r.exam,
            overall_total: r.overall_total(),
            percentage: r.percentage(),
            grade: r.grade(),
        }
    }
}

pub fn views<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<RecordView<'a>> {
    records.into_iter().map(RecordView::from).collect()
}

/// Build the record table: ID, Name, Coursework, Exam, %, Grade.
pub fn record_table<'a>(records: impl IntoIterator<Item = &'a Record>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Coursework", "Exam", "%", "Grade"]);

    for r in records {
        table.add_row(vec![
            Cell::new(&r.id),
            Cell::new(&r.name),
            Cell::new(r.coursework_total()).set_alignment(CellAlignment::Center),
            Cell::new(r.exam).set_alignment(CellAlignment::Center),
            Cell::new(format_percentage(r.percentage())).set_alignment(CellAlignment::Center),
            Cell::new(r.grade()).set_alignment(CellAlignment::Center),
        ]);
    }

    table
}

/// Percentage to one decimal place.
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.1}%")
}

/// Print records in the chosen format.
pub fn print_records<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    format: Format,
) -> Result<()> {
    match format {
        Format::Table => println!("{}", record_table(records)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&views(records))?),
    }
    Ok(())
}
