//! The `marksheet delete` command.

use anyhow::Result;

use marksheet_core::error::{MarksheetError, StoreError};
use marksheet_core::matcher::Matcher;
use marksheet_core::store::RemovePolicy;

use super::{committed, Context};
use crate::render::{self, Format};

pub fn execute(ctx: &Context, query: String, first: bool) -> Result<()> {
    anyhow::ensure!(!query.trim().is_empty(), "search text cannot be empty");

    let mut sheet = ctx.open()?;
    let matcher = Matcher::query(query);
    let policy = if first {
        RemovePolicy::FirstMatch
    } else {
        RemovePolicy::RequireUnique
    };

    let removal = match sheet.remove(&matcher, policy) {
        Err(MarksheetError::Store(StoreError::Ambiguous { query, matches })) => {
            println!("Matching students:");
            render::print_records(sheet.store().find(&matcher), Format::Table)?;
            anyhow::bail!(
                "'{query}' matches {matches} students; use an exact id, or pass --first to delete the first one listed"
            );
        }
        other => committed(other)?,
    };

    if removal.match_count > 1 {
        println!(
            "{} students matched '{}', deleted the first.",
            removal.match_count,
            matcher.term()
        );
    }
    println!("Deleted {}", removal.record);
    Ok(())
}
