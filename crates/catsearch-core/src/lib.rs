//! catsearch-core — catalog search engine.
//!
//! Finds and ranks catalog records for a free-text query despite typos,
//! partial words and synonyms, and proposes autocomplete suggestions from
//! partial input.
//!
//! # Architecture
//!
//! ```text
//! Normalizer ──► SynonymExpander ──► FuzzyMatcher ──► Ranker
//!     │
//!     └──────────────────────────────────────────────► SuggestionGenerator
//! ```
//!
//! The engine is stateless: every entry point borrows a caller-owned,
//! read-only snapshot of records and returns a fresh result. The only shared
//! state is the immutable synonym table and default ranker, built once on
//! first use.

pub mod config;
pub mod fuzzy;
pub mod normalizer;
pub mod rank;
pub mod suggest;
pub mod synonyms;
pub mod types;

use std::sync::LazyLock;

pub use fuzzy::{levenshtein, similarity, MatchOptions};
pub use normalizer::normalize;
pub use rank::{Boost, BoostRule, PinRule, QueryContext, Ranker, SearchOptions};
pub use suggest::{suggest, suggest_default, SuggestionIndex};
pub use synonyms::{ExpandedQuery, SynonymGroup, SynonymTable};
pub use types::{CatalogRecord, MatchResult, ScoredRecord};

static DEFAULT_RANKER: LazyLock<Ranker> = LazyLock::new(Ranker::default);

/// Rank `records` against `query` with the built-in configuration.
pub fn search<'a>(
    records: &'a [CatalogRecord],
    query: &str,
    opts: &SearchOptions,
) -> Vec<&'a CatalogRecord> {
    DEFAULT_RANKER.search(records, query, opts)
}

/// Expand `query` against the built-in synonym table.
pub fn expand(query: &str) -> ExpandedQuery {
    SynonymTable::builtin().expand(query)
}

/// Match one record against an already expanded query.
pub fn matches(record: &CatalogRecord, expanded: &ExpandedQuery, opts: &MatchOptions) -> MatchResult {
    fuzzy::matches(record, expanded, opts)
}
