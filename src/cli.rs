use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use serde::de::DeserializeOwned;

use crate::config::{OutputFormat, QueryKitConfig};
use crate::output::{render_compiled, render_rows};
use crate::types::{DeleteQuery, InsertQuery, QueryError, QuerySpec, Row, UpdateQuery};

/// QueryKit CLI
#[derive(Parser, Debug)]
#[command(name = "querykit")]
#[command(about = "Compile JSON query descriptions to SQL or run them against JSON rows", long_about = None)]
pub struct Args {
    /// Config file (defaults: /etc/querykit/querykit.toml, ./querykit.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format, overrides the configured one
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a SELECT description
    Select { query: PathBuf },
    /// Compile an INSERT description
    Insert { query: PathBuf },
    /// Compile an UPDATE description
    Update { query: PathBuf },
    /// Compile a DELETE description
    Delete { query: PathBuf },
    /// Evaluate a SELECT description against a JSON array of rows
    Eval { query: PathBuf, rows: PathBuf },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, QueryError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Run one subcommand and return the rendered output.
pub fn run(args: Args, config: &QueryKitConfig) -> Result<String, QueryError> {
    // CLI args override everything
    let format = args.format.unwrap_or(config.format);

    match args.command {
        Command::Select { query } => {
            let spec: QuerySpec = read_json(&query)?;
            render_compiled(&crate::make_select_query(&spec)?, format)
        }
        Command::Insert { query } => {
            let insert: InsertQuery = read_json(&query)?;
            render_compiled(&crate::make_insert_query(&insert)?, format)
        }
        Command::Update { query } => {
            let update: UpdateQuery = read_json(&query)?;
            render_compiled(&crate::make_update_query(&update)?, format)
        }
        Command::Delete { query } => {
            let delete: DeleteQuery = read_json(&query)?;
            render_compiled(&crate::make_delete_query(&delete)?, format)
        }
        Command::Eval { query, rows } => {
            let spec: QuerySpec = read_json(&query)?;
            let rows: Vec<Row> = read_json(&rows)?;
            info!("evaluating {} against {} row(s)", query.display(), rows.len());
            render_rows(&crate::select_from_rows(&spec, &rows)?, format)
        }
    }
}
