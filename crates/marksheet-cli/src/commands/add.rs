//! The `marksheet add` command.

use anyhow::Result;

use marksheet_core::model::Record;

use super::{committed, Context};

pub fn execute(
    ctx: &Context,
    id: String,
    name: String,
    coursework: [String; 3],
    exam: String,
) -> Result<()> {
    let [cw1, cw2, cw3] = &coursework;
    let record = Record::parse(&id, &name, [cw1.as_str(), cw2.as_str(), cw3.as_str()], &exam)?;
    let label = record.to_string();

    let mut sheet = ctx.open()?;
    committed(sheet.add(record))?;

    println!("Added {label}");
    println!("{} record(s) in {}", sheet.store().len(), ctx.config.data_file.display());
    Ok(())
}
