//! marksheet CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "marksheet", version, about = "Student marks manager")]
struct Cli {
    /// Student records file (overrides config and MARKSHEET_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all records in store order
    List {
        /// Output format: table, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Find records by id (exact) or name (case-insensitive substring)
    Find {
        /// Name fragment or id
        query: String,

        /// Output format: table, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Add a student record
    Add {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        /// Coursework mark 1
        #[arg(long)]
        cw1: String,

        /// Coursework mark 2
        #[arg(long)]
        cw2: String,

        /// Coursework mark 3
        #[arg(long)]
        cw3: String,

        /// Exam mark
        #[arg(long)]
        exam: String,
    },

    /// Delete the record matching a name or id
    Delete {
        /// Name fragment or id
        query: String,

        /// Delete the first match when several records match
        #[arg(long)]
        first: bool,
    },

    /// Change one field of the first record matching a name or id
    Update {
        /// Name fragment or id
        query: String,

        /// Field to change: id, name, cw1, cw2, cw3, exam
        #[arg(long)]
        field: String,

        /// New value
        #[arg(long)]
        value: String,
    },

    /// Show the record(s) with the highest overall total
    Highest {
        /// Output format: table, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Show the record(s) with the lowest overall total
    Lowest {
        /// Output format: table, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Reorder the records by overall total and save
    Sort {
        /// Sort direction: ascending (lowest first) or descending (highest first)
        #[arg(long)]
        order: String,
    },

    /// Class-wide statistics
    Summary {
        /// Output format: table, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Create a starter config and an empty records file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marksheet=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = commands::Context::load(cli.config, cli.data_file).and_then(|ctx| {
        match cli.command {
            Commands::List { format } => commands::list::execute(&ctx, format),
            Commands::Find { query, format } => commands::find::execute(&ctx, query, format),
            Commands::Add {
                id,
                name,
                cw1,
                cw2,
                cw3,
                exam,
            } => commands::add::execute(&ctx, id, name, [cw1, cw2, cw3], exam),
            Commands::Delete { query, first } => commands::delete::execute(&ctx, query, first),
            Commands::Update {
                query,
                field,
                value,
            } => commands::update::execute(&ctx, query, field, value),
            Commands::Highest { format } => {
                commands::rank::execute(&ctx, commands::rank::Rank::Highest, format)
            }
            Commands::Lowest { format } => {
                commands::rank::execute(&ctx, commands::rank::Rank::Lowest, format)
            }
            Commands::Sort { order } => commands::sort::execute(&ctx, order),
            Commands::Summary { format } => commands::summary::execute(&ctx, format),
            Commands::Init => commands::init::execute(&ctx),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
