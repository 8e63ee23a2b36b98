//! The `marksheet update` command.

use anyhow::Result;

use marksheet_core::matcher::Matcher;
use marksheet_core::model::Field;

use super::{committed, Context};
use crate::render::{self, Format};

pub fn execute(ctx: &Context, query: String, field: String, value: String) -> Result<()> {
    anyhow::ensure!(!query.trim().is_empty(), "search text cannot be empty");
    let field: Field = field.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let mut sheet = ctx.open()?;
    let matcher = Matcher::query(query);
    let update = committed(sheet.update(&matcher, field, &value))?;

    if update.match_count > 1 {
        println!(
            "{} students matched '{}', updated the first.",
            update.match_count,
            matcher.term()
        );
    }
    println!(
        "Updated {} of {}: {} -> {}",
        update.field,
        update.record,
        update.previous,
        update.record.value_of(field)
    );
    render::print_records([&update.record], Format::Table)
}
