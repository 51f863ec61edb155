//! Autocomplete suggestions from partial input.
//!
//! Two sources feed the candidate list, in this order:
//!
//! 1. full record names whose normalised form starts with the input;
//! 2. frequently occurring name words sharing the input's first few
//!    characters.
//!
//! Word frequencies live in an [`fst::Map`] keyed by word, so the popular-word
//! lookup is a prefix scan over the automaton rather than a pass over the
//! catalog.

use std::collections::BTreeMap;

use fst::{Automaton, IntoStreamer, Map, Streamer};
use indexmap::IndexSet;

use crate::config::{SuggestConfig, DEFAULT_MAX_SUGGESTIONS};
use crate::normalizer::{char_len, char_prefix, normalize, significant_words};
use crate::types::CatalogRecord;

/// Per-snapshot autocomplete index. Immutable once built.
pub struct SuggestionIndex {
    /// `(original name, normalised name)` in catalog order.
    names: Vec<(String, String)>,
    word_counts: Map<Vec<u8>>,
    cfg: SuggestConfig,
}

impl std::fmt::Debug for SuggestionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionIndex")
            .field("names", &self.names.len())
            .field("words", &self.word_counts.len())
            .field("cfg", &self.cfg)
            .finish()
    }
}

impl SuggestionIndex {
    pub fn build(records: &[CatalogRecord]) -> Self {
        Self::with_config(records, SuggestConfig::default())
    }

    pub fn with_config(records: &[CatalogRecord], cfg: SuggestConfig) -> Self {
        let names: Vec<(String, String)> = records
            .iter()
            .map(|r| (r.name.clone(), r.normalized_name()))
            .collect();

        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for (_, normalized) in &names {
            for word in significant_words(normalized) {
                *counts.entry(word).or_default() += 1;
            }
        }

        let word_counts = match Map::from_iter(counts) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(error = %err, "failed to build suggestion word index");
                Map::default()
            }
        };

        Self {
            names,
            word_counts,
            cfg,
        }
    }

    /// Number of distinct indexed name words.
    pub fn word_count(&self) -> usize {
        self.word_counts.len()
    }

    /// How often `word` occurs across all record names.
    pub fn occurrences(&self, word: &str) -> u64 {
        self.word_counts.get(word).unwrap_or(0)
    }

    /// Up to `max` suggestions for `partial`, full-name matches first.
    pub fn suggest(&self, partial: &str, max: usize) -> Vec<String> {
        let input = normalize(partial);
        let input_len = char_len(&input);
        if input_len < self.cfg.min_input_len {
            return Vec::new();
        }

        let mut candidates: IndexSet<String> = self
            .names
            .iter()
            .filter(|(_, normalized)| normalized.starts_with(&input))
            .map(|(original, _)| original.clone())
            .collect();

        for word in self.popular_words(&input, max) {
            if char_len(&word) >= input_len {
                candidates.insert(word);
            }
        }

        candidates.into_iter().take(max).collect()
    }

    /// The `max` most frequent name words that share the input's leading
    /// characters. Ties resolve alphabetically.
    fn popular_words(&self, input: &str, max: usize) -> Vec<String> {
        let prefix = char_prefix(input, self.cfg.prefix_len);
        let matcher = fst::automaton::Str::new(prefix).starts_with();
        let mut stream = self.word_counts.search(matcher).into_stream();

        let mut words: Vec<(String, u64)> = Vec::new();
        while let Some((key, count)) = stream.next() {
            words.push((String::from_utf8_lossy(key).into_owned(), count));
        }
        words.sort_by(|a, b| b.1.cmp(&a.1));
        words.truncate(max);
        words.into_iter().map(|(word, _)| word).collect()
    }
}

/// Build a throwaway index and query it once.
pub fn suggest(records: &[CatalogRecord], partial: &str, max: usize) -> Vec<String> {
    SuggestionIndex::build(records).suggest(partial, max)
}

/// [`suggest`] with the default suggestion count.
pub fn suggest_default(records: &[CatalogRecord], partial: &str) -> Vec<String> {
    suggest(records, partial, DEFAULT_MAX_SUGGESTIONS)
}
