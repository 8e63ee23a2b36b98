//! The `marksheet summary` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use marksheet_core::summary::Summary;

use super::Context;
use crate::render::{format_percentage, Format};

pub fn execute(ctx: &Context, format: Option<String>) -> Result<()> {
    let format = ctx.format(format)?;
    let sheet = ctx.open()?;
    let summary = Summary::of(sheet.store());

    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let Some(summary) = summary else {
        println!("No data.");
        return Ok(());
    };

    let mut table = Table::new();
    table.set_header(vec!["Students", "Mean total", "Mean %", "Highest", "Lowest"]);
    table.add_row(vec![
        Cell::new(summary.count),
        Cell::new(format!("{:.1}", summary.mean_total)),
        Cell::new(format_percentage(summary.mean_percentage)),
        Cell::new(summary.highest_total),
        Cell::new(summary.lowest_total),
    ]);
    println!("{table}");

    let mut grades = Table::new();
    grades.set_header(vec!["Grade", "Students"]);
    for g in &summary.grade_distribution {
        grades.add_row(vec![Cell::new(g.grade), Cell::new(g.count)]);
    }
    println!("{grades}");
    Ok(())
}
