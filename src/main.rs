mod config;
mod error;
mod importer;
mod input;
mod logging;
mod scanner;
mod sql;
mod validate;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::{Config, ConfigOverrides};
use crate::importer::{RunContext, run_import};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Turn directories of word-list files into a batched SQL import script"
)]
struct Cli {
    /// Optional path to a configuration TOML file overriding defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing the *.txt word lists
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path of the SQL file to (over)write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of rows per INSERT statement
    #[arg(long = "batch-size")]
    batch_size: Option<usize>,

    /// Target table name
    #[arg(long)]
    table: Option<String>,

    /// Language tag stored with every word
    #[arg(long)]
    language: Option<String>,

    /// Scan and report without writing the SQL file
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;

    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            tracing::warn!("Ignoring unreadable .env file: {}", err);
        }
    }

    let overrides = ConfigOverrides {
        input_dir: cli.input.clone(),
        output_file: cli.output.clone(),
        batch_size: cli.batch_size,
        table: cli.table.clone(),
        language: cli.language.clone(),
    };

    let config = Config::load(cli.config.clone(), overrides)?;
    tracing::debug!("Resolved configuration: {:?}", config);

    let run_ctx = RunContext {
        config: &config,
        dry_run: cli.dry_run,
    };

    let summary = run_import(&run_ctx)?;
    match &summary.output {
        Some(path) => tracing::debug!(
            "Wrote {} words in {} statements to {}",
            summary.unique_words,
            summary.statements,
            path.display()
        ),
        None => tracing::debug!(
            "Dry run over {} files finished, nothing written",
            summary.stats.files
        ),
    }

    Ok(())
}
