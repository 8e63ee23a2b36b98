//! The `marksheet init` command.

use std::path::Path;

use anyhow::Result;

use marksheet_core::persistence::FlatFileRepository;
use marksheet_core::traits::RecordRepository;

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    if Path::new("marksheet.toml").exists() {
        println!("marksheet.toml already exists, skipping.");
    } else {
        std::fs::write("marksheet.toml", SAMPLE_CONFIG)?;
        println!("Created marksheet.toml");
    }

    let data_file = &ctx.config.data_file;
    if data_file.exists() {
        println!("{} already exists, skipping.", data_file.display());
    } else {
        // Loading a missing file creates it with an empty header.
        FlatFileRepository::new(data_file).load()?;
        println!("Created {}", data_file.display());
    }

    println!("\nNext steps:");
    println!("  1. Run: marksheet add --id S1 --name \"Ann\" --cw1 15 --cw2 18 --cw3 12 --exam 70");
    println!("  2. Run: marksheet list");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# marksheet configuration

# Student records file. ${VAR} references are expanded from the environment.
data_file = "studentMarks.txt"

# Output format when --format is not given: "table" or "json".
default_format = "table"
"#;
