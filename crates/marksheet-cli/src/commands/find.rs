//! The `marksheet find` command.

use anyhow::Result;

use marksheet_core::matcher::Matcher;

use super::Context;
use crate::render::{self, Format};

pub fn execute(ctx: &Context, query: String, format: Option<String>) -> Result<()> {
    let format = ctx.format(format)?;
    anyhow::ensure!(!query.trim().is_empty(), "search text cannot be empty");

    let sheet = ctx.open()?;
    let store = sheet.store();
    let matcher = Matcher::query(query);
    let found = store.count(&matcher);

    if format == Format::Json {
        return render::print_records(store.find(&matcher), format);
    }

    println!("Found {found} match(es) for '{}'", matcher.term());
    if found > 0 {
        render::print_records(store.find(&matcher), format)?;
    } else if !store.is_empty() {
        // Fall back to the full list, like the search dialog does.
        render::print_records(store, format)?;
    }
    Ok(())
}
