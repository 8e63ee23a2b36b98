//! The `marksheet sort` command.

use anyhow::Result;

use marksheet_core::store::SortOrder;

use super::{committed, Context};
use crate::render::{self, Format};

pub fn execute(ctx: &Context, order: String) -> Result<()> {
    let order: SortOrder = order.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let mut sheet = ctx.open()?;
    if !committed(sheet.sort(order))? {
        println!("No data.");
        return Ok(());
    }

    println!(
        "Sorted {} record(s) by overall total ({order})",
        sheet.store().len()
    );
    render::print_records(sheet.store(), Format::Table)
}
