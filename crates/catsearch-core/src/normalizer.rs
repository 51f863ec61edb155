//! Normalizer — canonical text form shared by queries and catalog records.
//!
//! Lower-cases, strips everything that is not a letter, digit, whitespace or
//! hyphen, collapses whitespace runs to a single space and trims. Every
//! comparison in the engine happens between normalised strings.

use regex::Regex;
use std::sync::LazyLock;

/// Words shorter than this are ignored when tokenising for expansion and
/// fuzzy comparison.
pub const SIGNIFICANT_WORD_LEN: usize = 3;

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{Alphabetic}\p{N}\s-]").expect("disallowed-character pattern must compile")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

/// Normalise `text`. Total: empty input yields empty output.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lower, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Length in characters, the unit every length rule in the engine uses.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Whitespace-delimited words of `text` with at least
/// [`SIGNIFICANT_WORD_LEN`] characters.
pub fn significant_words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|word| char_len(word) >= SIGNIFICANT_WORD_LEN)
}

/// The first `n` characters of `s` (all of it when shorter).
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
