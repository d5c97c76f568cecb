use std::sync::LazyLock;

use regex::Regex;

/// Longest word accepted, in characters. Matches the `WordText` column width.
pub const MAX_WORD_LEN: usize = 255;

/// Letters (general category L*), hyphens and apostrophes only
static WORD_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}'-]+$").expect("Invalid word shape regex"));

/// Clean a raw token into a word, or reject it.
///
/// Surrounding whitespace and single quotes are stripped, runs of two or more
/// apostrophes collapse to one, and what remains must consist of letters,
/// hyphens and apostrophes without a hyphen or apostrophe at either end.
pub fn clean_word(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let stripped = raw.trim().trim_matches('\'');
    let cleaned = collapse_apostrophes(stripped);

    if !WORD_SHAPE.is_match(&cleaned)
        || cleaned.starts_with(['-', '\''])
        || cleaned.ends_with(['-', '\''])
    {
        return None;
    }

    if cleaned.chars().count() > MAX_WORD_LEN {
        return None;
    }

    Some(cleaned)
}

fn collapse_apostrophes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_was_quote = false;

    for c in input.chars() {
        let is_quote = c == '\'';
        if is_quote && previous_was_quote {
            continue;
        }
        out.push(c);
        previous_was_quote = is_quote;
    }

    out
}
