use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::scanner::{self, ScanStats};
use crate::sql::{self, SqlTarget};

pub struct RunContext<'a> {
    pub config: &'a Config,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub stats: ScanStats,
    pub unique_words: usize,
    pub statements: usize,
    /// `None` on a dry run
    pub output: Option<PathBuf>,
}

pub fn run_import(ctx: &RunContext<'_>) -> Result<ImportSummary> {
    let config = ctx.config;
    println!("Input directory: {}", config.input_dir.display());
    println!("Output SQL file: {}", config.output_file.display());

    println!("Scanning for .txt files...");
    let report = scanner::scan_directory(&config.input_dir)?;
    print_scan_stats(&report.stats, report.words.len());

    let target = SqlTarget {
        table: config.table.clone(),
        language: config.language.clone(),
        batch_size: config.batch_size,
    };

    if ctx.dry_run {
        let statements = sql::statement_count(report.words.len(), target.batch_size);
        println!(
            "[DRY RUN] Would write {} INSERT statements (batch size {})",
            statements, target.batch_size
        );
        return Ok(ImportSummary {
            stats: report.stats,
            unique_words: report.words.len(),
            statements,
            output: None,
        });
    }

    if report.words.is_empty() {
        println!("No unique valid words found to insert.");
    } else {
        println!("Generating SQL file with batch size {}...", target.batch_size);
    }

    let source_label = config.input_dir.display().to_string();
    let statements =
        sql::write_script_file(&config.output_file, &report.words, &target, &source_label)
            .context("failed to generate SQL import script")?;

    if report.words.is_empty() {
        println!("Empty SQL file created: {}", config.output_file.display());
    } else {
        println!("Successfully generated SQL file: {}", config.output_file.display());
    }

    Ok(ImportSummary {
        stats: report.stats,
        unique_words: report.words.len(),
        statements,
        output: Some(config.output_file.clone()),
    })
}

fn print_scan_stats(stats: &ScanStats, unique_words: usize) {
    if stats.files > 0 {
        println!(
            "Processed {} files and {} lines.",
            stats.files, stats.lines
        );
    }
    println!("Found {} unique valid words.", unique_words);
    if stats.skipped > 0 {
        println!(
            "Skipped {} lines/words due to invalid format or content.",
            stats.skipped
        );
    }
}
