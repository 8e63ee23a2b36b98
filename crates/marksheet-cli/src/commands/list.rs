//! The `marksheet list` command.

use anyhow::Result;

use super::Context;
use crate::render::{self, Format};

pub fn execute(ctx: &Context, format: Option<String>) -> Result<()> {
    let format = ctx.format(format)?;
    let sheet = ctx.open()?;
    let store = sheet.store();

    if format == Format::Table && store.is_empty() {
        println!("No records.");
        return Ok(());
    }

    render::print_records(store, format)?;
    if format == Format::Table {
        println!("All records ({})", store.len());
    }
    Ok(())
}
