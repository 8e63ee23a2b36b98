//! The `marksheet highest` and `marksheet lowest` commands.

use anyhow::Result;

use marksheet_core::store::Standing;

use super::Context;
use crate::render::{self, Format};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Highest,
    Lowest,
}

pub fn execute(ctx: &Context, rank: Rank, format: Option<String>) -> Result<()> {
    let format = ctx.format(format)?;
    let sheet = ctx.open()?;
    let store = sheet.store();

    let standing: Option<Standing<'_>> = match rank {
        Rank::Highest => store.highest(),
        Rank::Lowest => store.lowest(),
    };

    if format == Format::Json {
        let json = match &standing {
            Some(s) => serde_json::json!({
                "total": s.total,
                "records": render::views(s.records.iter().copied()),
            }),
            None => serde_json::json!({ "total": null, "records": [] }),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    let Some(standing) = standing else {
        println!("No data.");
        return Ok(());
    };

    let label = match rank {
        Rank::Highest => "Highest",
        Rank::Lowest => "Lowest",
    };
    println!("{label} score: {}", standing.total);
    render::print_records(standing.records.iter().copied(), format)
}
