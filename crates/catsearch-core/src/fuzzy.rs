//! Fuzzy matching — edit-distance similarity and per-record match decisions.
//!
//! [`matches`] runs two passes over a record's searchable text. The exact
//! pass looks for any expanded term as a substring and short-circuits with a
//! perfect score. The fuzzy pass, reached only when nothing is contained,
//! takes the best word-level similarity, a whole-text prefix proxy, and a
//! partial multi-word containment score.

use crate::config::{
    DEFAULT_MATCH_THRESHOLD, DEFAULT_PREFIX_WINDOW, DEFAULT_WORD_MATCH_WEIGHT,
};
use crate::normalizer::{char_len, char_prefix, significant_words};
use crate::synonyms::ExpandedQuery;
use crate::types::{CatalogRecord, MatchResult};

// ---------------------------------------------------------------------------
// Edit distance
// ---------------------------------------------------------------------------

/// Levenshtein distance in characters: unit-cost insert, delete and
/// substitute, no transpositions.
pub use strsim::levenshtein;

/// `1 - distance / longer length`, in `[0, 1]`. Two empty strings are
/// identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

// ---------------------------------------------------------------------------
// Record matching
// ---------------------------------------------------------------------------

/// Knobs for [`matches`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// Minimum fuzzy evidence for a non-exact match to be accepted.
    pub fuzzy_threshold: f64,
    /// Skip the fuzzy pass entirely; only substring containment matches.
    pub require_exact: bool,
    /// Weight applied to the fraction of query words found verbatim.
    pub word_match_weight: f64,
    /// Extra characters beyond a term's length compared in the prefix proxy.
    pub prefix_window: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_MATCH_THRESHOLD,
            require_exact: false,
            word_match_weight: DEFAULT_WORD_MATCH_WEIGHT,
            prefix_window: DEFAULT_PREFIX_WINDOW,
        }
    }
}

/// Decide whether `record` matches `expanded` and how strongly.
pub fn matches(record: &CatalogRecord, expanded: &ExpandedQuery, opts: &MatchOptions) -> MatchResult {
    match_text(&record.searchable_text(), expanded, opts)
}

/// [`matches`] over text that is already normalised.
pub fn match_text(record_text: &str, expanded: &ExpandedQuery, opts: &MatchOptions) -> MatchResult {
    if expanded.match_terms().any(|term| record_text.contains(term)) {
        return MatchResult::EXACT;
    }
    if opts.require_exact {
        return MatchResult::NONE;
    }

    let record_words: Vec<&str> = significant_words(record_text).collect();
    let mut best_score = 0.0_f64;

    for term in expanded.match_terms() {
        for word in &record_words {
            best_score = best_score.max(similarity(term, word));
        }
        let window = char_prefix(record_text, char_len(term) + opts.prefix_window);
        best_score = best_score.max(similarity(term, window));
    }

    let query_words: Vec<&str> = significant_words(expanded.normalized()).collect();
    let contained = query_words
        .iter()
        .filter(|word| record_text.contains(*word))
        .count();
    if contained > 0 {
        let word_match_score = contained as f64 / query_words.len() as f64;
        best_score = best_score.max(word_match_score * opts.word_match_weight);
    }

    MatchResult {
        matches: best_score >= opts.fuzzy_threshold,
        score: best_score,
    }
}
