use std::io::{self, BufRead};

use crate::scanner::{ScanStats, WordSet};
use crate::validate::clean_word;

/// First whitespace-delimited field of a line, if the line has any content.
pub fn first_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

/// Feed every line of `reader` through the validator into `words`.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. On a read or decoding error
/// the error is returned as-is; whatever was collected before it stays in
/// `words` and `stats`.
pub fn read_words<R: BufRead>(
    mut reader: R,
    words: &mut WordSet,
    stats: &mut ScanStats,
) -> io::Result<()> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }

        let chunk = std::str::from_utf8(&buf)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        let chunk = chunk.strip_suffix('\n').unwrap_or(chunk);
        let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);

        for line in chunk.split('\r') {
            read_line(line, words, stats);
        }
    }
}

fn read_line(line: &str, words: &mut WordSet, stats: &mut ScanStats) {
    stats.lines += 1;

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return;
    }

    match first_token(trimmed).and_then(clean_word) {
        Some(word) => {
            words.insert(word);
        }
        None => {
            tracing::debug!("Skipping line: {}", trimmed);
            stats.skipped += 1;
        }
    }
}
