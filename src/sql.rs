use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::ImportError;
use crate::scanner::WordSet;

pub const EMPTY_SCRIPT: &str = "-- No valid words found to import.\n";
const CREATED_AT_EXPR: &str = "unix_timestamp()";

/// Where and how the words are inserted.
#[derive(Debug, Clone)]
pub struct SqlTarget {
    pub table: String,
    pub language: String,
    pub batch_size: usize,
}

/// Double every single quote so the value can sit inside a `'...'` literal.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

pub fn statement_count(words: usize, batch_size: usize) -> usize {
    words.div_ceil(batch_size.max(1))
}

/// Render the import script for `words` into `writer`.
///
/// Words come out in the set's codepoint order, `batch_size` rows per
/// `INSERT IGNORE` statement. Returns the number of statements written.
pub fn write_script<W: Write>(
    writer: &mut W,
    words: &WordSet,
    target: &SqlTarget,
    source_label: &str,
) -> io::Result<usize> {
    if words.is_empty() {
        writer.write_all(EMPTY_SCRIPT.as_bytes())?;
        return Ok(0);
    }

    writeln!(writer, "-- SQL import script generated for {}", target.table)?;
    writeln!(
        writer,
        "-- Found {} unique valid words from {}",
        words.len(),
        source_label
    )?;
    writeln!(writer)?;

    let sorted: Vec<&str> = words.iter().collect();
    let language = escape_sql_string(&target.language);
    let mut statements = 0;

    for batch in sorted.chunks(target.batch_size.max(1)) {
        writeln!(
            writer,
            "INSERT IGNORE INTO {} (WordText, Language, QueryCount, CreatedAt) VALUES",
            target.table
        )?;

        let rows: Vec<String> = batch
            .iter()
            .map(|word| {
                format!(
                    "  ('{}', '{}', 0, {})",
                    escape_sql_string(word),
                    language,
                    CREATED_AT_EXPR
                )
            })
            .collect();

        writer.write_all(rows.join(",\n").as_bytes())?;
        writer.write_all(b";\n\n")?;
        statements += 1;
    }

    Ok(statements)
}

/// Write the script to `path`, replacing any previous file.
pub fn write_script_file(
    path: &Path,
    words: &WordSet,
    target: &SqlTarget,
    source_label: &str,
) -> Result<usize, ImportError> {
    let write_error = |source| ImportError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
    }

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    let statements = write_script(&mut writer, words, target, source_label).map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    tracing::debug!("Wrote {} statements to {}", statements, path.display());
    Ok(statements)
}
