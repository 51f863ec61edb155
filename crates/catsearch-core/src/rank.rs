//! Ranker — scores every record in a snapshot against one query, applies
//! boost rules, and returns the accepted records in relevance order.
//!
//! # Pipeline
//!
//! ```text
//! query ──► normalize ──► expand ──► match (per record) ──► boost ──► sort ──► truncate
//! ```
//!
//! Boosts run in priority order: configured [`BoostRule`]s first, then the
//! exact-name pin, then the name-contains floor. A boost only ever raises a
//! score. Only configured rules may accept a record the matcher rejected.
//!
//! # Ordering
//!
//! Pinned records first, then higher score, then exact-name matches, then
//! shorter names. The sort is stable, so anything still tied keeps catalog
//! order.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::config::{
    Config, SearchConfig, DEFAULT_FUZZY_THRESHOLD, DEFAULT_MAX_RESULTS,
};
use crate::fuzzy::{match_text, MatchOptions};
use crate::normalizer::{char_len, normalize};
use crate::synonyms::SynonymTable;
use crate::types::{CatalogRecord, ScoredRecord};

const PINNED_SCORE: f64 = 1.0;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Per-call search options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Minimum similarity for a fuzzy (non-containment) match.
    pub fuzzy_threshold: f64,
    pub max_results: usize,
    /// Only accept records that contain an expanded term verbatim.
    pub require_exact: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
            require_exact: false,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(cfg: &SearchConfig) -> Self {
        Self {
            fuzzy_threshold: cfg.fuzzy_threshold,
            max_results: cfg.max_results,
            require_exact: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Boost rules
// ---------------------------------------------------------------------------

/// The query as seen by boost rules.
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// Output of [`normalize`].
    pub normalized: String,
}

impl QueryContext {
    pub fn new(query: &str) -> Self {
        Self {
            normalized: normalize(query),
        }
    }
}

/// What a boost rule does to a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boost {
    /// Accept, force the score to 1.0, and sort ahead of every unpinned record.
    Pin,
    /// Accept and raise the score to at least this value.
    Floor(f64),
}

/// A domain-specific predicate over a query and a record.
pub trait BoostRule: std::fmt::Debug {
    fn evaluate(&self, query: &QueryContext, record: &CatalogRecord) -> Option<Boost>;
}

/// Data-driven pinned-priority rule, configured from `[[pins]]`.
///
/// When the query mentions any of `query_terms`, a record whose name contains
/// any of `name_terms` is pinned. Failing that, a record whose name contains
/// any of `related_terms` gets `floor` as its minimum score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PinRule {
    pub query_terms: Vec<String>,
    pub name_terms: Vec<String>,
    #[serde(default)]
    pub related_terms: Vec<String>,
    #[serde(default)]
    pub floor: Option<f64>,
}

impl PinRule {
    /// A pin with no floor tier. Terms are normalised like record names.
    pub fn new<S: AsRef<str>>(query_terms: &[S], name_terms: &[S]) -> Self {
        Self {
            query_terms: normalize_terms(query_terms),
            name_terms: normalize_terms(name_terms),
            related_terms: Vec::new(),
            floor: None,
        }
    }

    /// Add the secondary tier: names containing any of `related_terms` score
    /// at least `floor`.
    pub fn with_floor<S: AsRef<str>>(mut self, related_terms: &[S], floor: f64) -> Self {
        self.related_terms = normalize_terms(related_terms);
        self.floor = Some(floor);
        self
    }

    /// Run every term through [`normalize`], dropping terms that come out
    /// empty. Rules built from deserialised config must pass through here
    /// before they can match normalised names.
    pub fn normalized(&self) -> Self {
        Self {
            query_terms: normalize_terms(&self.query_terms),
            name_terms: normalize_terms(&self.name_terms),
            related_terms: normalize_terms(&self.related_terms),
            floor: self.floor,
        }
    }
}

fn normalize_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms
        .iter()
        .map(|t| normalize(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect()
}

impl BoostRule for PinRule {
    fn evaluate(&self, query: &QueryContext, record: &CatalogRecord) -> Option<Boost> {
        if !self.query_terms.iter().any(|t| query.normalized.contains(t.as_str())) {
            return None;
        }
        let name = record.normalized_name();
        if self.name_terms.iter().any(|t| name.contains(t.as_str())) {
            return Some(Boost::Pin);
        }
        match self.floor {
            Some(floor) if self.related_terms.iter().any(|t| name.contains(t.as_str())) => {
                Some(Boost::Floor(floor))
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Ranker
// ---------------------------------------------------------------------------

/// Immutable search pipeline. Build once, share freely across threads.
#[derive(Debug)]
pub struct Ranker {
    synonyms: SynonymTable,
    rules: Vec<Box<dyn BoostRule + Send + Sync>>,
    tuning: SearchConfig,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::from_config(&Config::defaults())
    }
}

impl Ranker {
    pub fn new(synonyms: SynonymTable, tuning: SearchConfig) -> Self {
        Self {
            synonyms,
            rules: Vec::new(),
            tuning,
        }
    }

    /// Built-in synonyms plus configured extras, configured pins, and
    /// `[search]` tuning.
    pub fn from_config(cfg: &Config) -> Self {
        let mut ranker = Self::new(SynonymTable::with_extra(&cfg.synonyms), cfg.search.clone());
        for pin in &cfg.pins {
            ranker = ranker.with_rule(pin.normalized());
        }
        ranker
    }

    /// Append a boost rule. Earlier rules take priority. A [`PinRule`] built
    /// by hand should come from [`PinRule::new`] or [`PinRule::normalized`].
    pub fn with_rule(mut self, rule: impl BoostRule + Send + Sync + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Search options matching this ranker's configuration.
    pub fn default_options(&self) -> SearchOptions {
        SearchOptions::from(&self.tuning)
    }

    /// Ranked records for `query`. A blank query returns every record in
    /// catalog order.
    pub fn search<'a>(
        &self,
        records: &'a [CatalogRecord],
        query: &str,
        opts: &SearchOptions,
    ) -> Vec<&'a CatalogRecord> {
        self.search_scored(records, query, opts)
            .into_iter()
            .map(|scored| scored.record)
            .collect()
    }

    /// Like [`Ranker::search`], keeping the ranking evidence. Records passed
    /// through for a blank query carry a score of zero.
    pub fn search_scored<'a>(
        &self,
        records: &'a [CatalogRecord],
        query: &str,
        opts: &SearchOptions,
    ) -> Vec<ScoredRecord<'a>> {
        let ctx = QueryContext::new(query);
        if ctx.normalized.is_empty() {
            return records
                .iter()
                .map(|record| ScoredRecord {
                    record,
                    score: 0.0,
                    pinned: false,
                    exact_name: false,
                })
                .collect();
        }

        let expanded = self.synonyms.expand(query);
        let match_opts = MatchOptions {
            fuzzy_threshold: opts.fuzzy_threshold,
            require_exact: opts.require_exact,
            word_match_weight: self.tuning.word_match_weight,
            prefix_window: self.tuning.prefix_window,
        };
        let query_len = char_len(&ctx.normalized);

        let mut accepted: Vec<ScoredRecord<'a>> = records
            .iter()
            .filter_map(|record| {
                let result = match_text(&record.searchable_text(), &expanded, &match_opts);
                let mut score = result.score;
                let mut keep = result.matches;
                let mut pinned = false;

                match self.rules.iter().find_map(|rule| rule.evaluate(&ctx, record)) {
                    Some(Boost::Pin) => {
                        score = PINNED_SCORE;
                        keep = true;
                        pinned = true;
                    }
                    Some(Boost::Floor(floor)) => {
                        score = score.max(floor);
                        keep = true;
                    }
                    None => {}
                }

                // A name containing the query means the searchable text does
                // too, so the exact pass has already scored it 1.0. The
                // name-contains floor cannot raise an accepted score today.
                let name = record.normalized_name();
                let exact_name = name == ctx.normalized;
                if exact_name {
                    score = 1.0;
                } else if query_len >= self.tuning.name_contains_min_query_len
                    && name.contains(&ctx.normalized)
                {
                    score = score.max(self.tuning.name_contains_score);
                }

                keep.then_some(ScoredRecord {
                    record,
                    score,
                    pinned,
                    exact_name,
                })
            })
            .collect();

        let total = accepted.len();
        accepted.sort_by(compare);
        accepted.truncate(opts.max_results);

        tracing::debug!(
            query = %ctx.normalized,
            terms = expanded.len(),
            candidates = records.len(),
            accepted = total,
            returned = accepted.len(),
            "catalog search"
        );
        accepted
    }
}

/// Pinned first, higher score, exact name, shorter name.
fn compare(a: &ScoredRecord<'_>, b: &ScoredRecord<'_>) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then_with(|| b.score.total_cmp(&a.score))
        .then_with(|| b.exact_name.cmp(&a.exact_name))
        .then_with(|| char_len(&a.record.name).cmp(&char_len(&b.record.name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names<'a>(results: &[&'a CatalogRecord]) -> Vec<&'a str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    fn bare_ranker() -> Ranker {
        Ranker::new(SynonymTable::builtin().clone(), SearchConfig::default())
    }

    #[test]
    fn exact_name_sorts_before_longer_names() {
        let records = vec![
            CatalogRecord::new("Steam Wallet Code €20"),
            CatalogRecord::new("Steam Wallet Code"),
        ];
        let results = bare_ranker().search(&records, "Steam Wallet Code", &SearchOptions::default());
        assert_eq!(names(&results), vec!["Steam Wallet Code", "Steam Wallet Code €20"]);
    }

    #[test]
    fn blank_query_is_identity() {
        let records = vec![CatalogRecord::new("B"), CatalogRecord::new("A")];
        let results = bare_ranker().search(&records, "  \t", &SearchOptions::default());
        assert_eq!(names(&results), vec!["B", "A"]);
    }

    #[test]
    fn punctuation_only_query_is_identity() {
        let records = vec![CatalogRecord::new("B"), CatalogRecord::new("A")];
        let results = bare_ranker().search(&records, "?!", &SearchOptions::default());
        assert_eq!(names(&results), vec!["B", "A"]);
    }

    #[test]
    fn equal_scores_fall_back_to_shorter_name() {
        let records = vec![
            CatalogRecord::new("Robux Gift Card 800").with_description("Roblox top-up"),
            CatalogRecord::new("Roblox 800 Robux"),
        ];
        let scored = bare_ranker().search_scored(&records, "roblox", &SearchOptions::default());
        assert_eq!(scored.len(), 2);
        assert!(scored.iter().all(|s| s.score == 1.0));
        // Equal scores, neither exact: shorter name wins.
        assert_eq!(scored[0].record.name, "Roblox 800 Robux");
    }

    #[test]
    fn unmatched_records_are_dropped() {
        let records = vec![CatalogRecord::new("Minecraft Minecoins 1720")];
        let results = bare_ranker().search(&records, "valorant", &SearchOptions::default());
        assert!(results.is_empty());
    }

    #[test]
    fn pin_rule_forces_acceptance_and_first_place() {
        let rule = PinRule::new(&["Game Pass"], &["game pass ultimate"]).with_floor(&["xbox"], 0.3);
        let ranker = bare_ranker().with_rule(rule);
        let records = vec![
            CatalogRecord::new("Game Pass Core 12 Months"),
            CatalogRecord::new("Xbox Live Gold"),
            CatalogRecord::new("Xbox Game Pass Ultimate 1 Month"),
            CatalogRecord::new("Roblox 800 Robux"),
        ];
        let scored = ranker.search_scored(&records, "game pass", &SearchOptions::default());
        let order: Vec<_> = scored.iter().map(|s| s.record.name.as_str()).collect();
        assert_eq!(
            order,
            vec!["Xbox Game Pass Ultimate 1 Month", "Game Pass Core 12 Months", "Xbox Live Gold"]
        );
        assert!(scored[0].pinned);
        assert!(!scored[1].pinned);
    }

    #[test]
    fn floor_applies_when_nothing_else_matches() {
        let rule = PinRule {
            query_terms: vec!["ultimate".into()],
            name_terms: vec!["does not occur".into()],
            related_terms: vec!["minecraft".into()],
            floor: Some(0.3),
        };
        let ranker = bare_ranker().with_rule(rule);
        let records = vec![CatalogRecord::new("Minecraft Java Edition")];
        let scored = ranker.search_scored(&records, "ultimate", &SearchOptions::default());
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].score, 0.3);
        assert!(!scored[0].pinned);
    }

    #[test]
    fn pin_terms_with_punctuation_match_normalized_names() {
        let rule = PinRule::new(&["Warfare"], &["Call of Duty: Modern Warfare"]);
        let ranker = bare_ranker().with_rule(rule);
        let records = vec![
            CatalogRecord::new("Modern Warfare Soundtrack"),
            CatalogRecord::new("Call of Duty: Modern Warfare III Extended Edition"),
        ];
        let scored = ranker.search_scored(&records, "warfare", &SearchOptions::default());
        assert_eq!(scored[0].record.name, "Call of Duty: Modern Warfare III Extended Edition");
        assert!(scored[0].pinned);
        assert!(!scored[1].pinned);
    }

    #[test]
    fn configured_pins_are_normalized_before_use() {
        let mut cfg = Config::defaults();
        cfg.pins = vec![PinRule {
            query_terms: vec!["MINECRAFT".into()],
            name_terms: vec!["Java & Bedrock".into()],
            related_terms: vec!["€ Minecoins".into()],
            floor: Some(0.4),
        }];
        let ranker = Ranker::from_config(&cfg);
        let records = vec![
            CatalogRecord::new("Minecoins 1720"),
            CatalogRecord::new("Minecraft Java & Bedrock Edition"),
        ];
        let scored = ranker.search_scored(&records, "Minecraft!", &ranker.default_options());
        assert_eq!(scored[0].record.name, "Minecraft Java & Bedrock Edition");
        assert!(scored[0].pinned);
        assert_eq!(scored[1].record.name, "Minecoins 1720");
        assert!(scored[1].score >= 0.4);
    }

    #[test]
    fn normalized_drops_terms_that_vanish() {
        let rule = PinRule {
            query_terms: vec!["?!".into(), " Game  Pass ".into()],
            name_terms: vec!["Game-Pass".into()],
            related_terms: Vec::new(),
            floor: None,
        }
        .normalized();
        assert_eq!(rule.query_terms, vec!["game pass"]);
        assert_eq!(rule.name_terms, vec!["game-pass"]);
    }

    #[test]
    fn name_containing_query_already_scores_as_containment() {
        let tuning = SearchConfig {
            name_contains_score: 0.2,
            ..SearchConfig::default()
        };
        let ranker = Ranker::new(SynonymTable::builtin().clone(), tuning);
        let records = vec![CatalogRecord::new("Valorant Points 1000")];
        let scored = ranker.search_scored(&records, "valorant points", &ranker.default_options());
        assert_eq!(scored[0].score, 1.0);
    }

    #[test]
    fn max_results_truncates() {
        let records: Vec<_> = (1..=10)
            .map(|i| CatalogRecord::new(format!("Steam Gift Card {i}")))
            .collect();
        let opts = SearchOptions {
            max_results: 3,
            ..SearchOptions::default()
        };
        let results = bare_ranker().search(&records, "steam", &opts);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn require_exact_drops_typo_matches() {
        let records = vec![CatalogRecord::new("Fortnite V-Bucks 1000")];
        let opts = SearchOptions {
            require_exact: true,
            ..SearchOptions::default()
        };
        assert!(bare_ranker().search(&records, "fortnte", &opts).is_empty());
        assert_eq!(bare_ranker().search(&records, "fortnte", &SearchOptions::default()).len(), 1);
    }

    #[test]
    fn default_ranker_carries_sample_pin() {
        let ranker = Ranker::default();
        let records = vec![
            CatalogRecord::new("Xbox Series Gift Card"),
            CatalogRecord::new("Xbox Game Pass Ultimate 3 Months"),
        ];
        let scored = ranker.search_scored(&records, "gamepass", &ranker.default_options());
        assert_eq!(scored[0].record.name, "Xbox Game Pass Ultimate 3 Months");
        assert!(scored[0].pinned);
        assert_eq!(scored.len(), 2);
    }
}
