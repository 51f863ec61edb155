//! Configuration types for catsearch.
//!
//! [`Config::load`] reads `~/.config/catsearch/config.toml` layered on top of
//! the built-in defaults. [`Config::defaults`] returns the same defaults
//! without touching the filesystem (useful in tests).
//!
//! The `DEFAULT_*` constants below are the only place engine thresholds are
//! spelled out; everything else refers to them.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::rank::PinRule;
use crate::synonyms::SynonymGroup;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Minimum fuzzy evidence the ranker accepts.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.5;
/// Minimum fuzzy evidence for a standalone [`matches`](crate::fuzzy::matches) call.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;
pub const DEFAULT_MAX_RESULTS: usize = 100;
pub const DEFAULT_WORD_MATCH_WEIGHT: f64 = 0.8;
pub const DEFAULT_PREFIX_WINDOW: usize = 10;
/// Score floor for a record whose name contains the whole query.
pub const DEFAULT_NAME_CONTAINS_SCORE: f64 = 0.9;
/// Queries shorter than this never trigger the name-contains boost.
pub const DEFAULT_NAME_CONTAINS_MIN_QUERY_LEN: usize = 4;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;
pub const DEFAULT_MIN_INPUT_LEN: usize = 2;
/// Number of leading characters a popular word must share with the input.
pub const DEFAULT_SUGGEST_PREFIX_LEN: usize = 3;

/// Sample pinned listing: subscription queries surface Game Pass Ultimate
/// first and other Xbox listings just below it.
const DEFAULT_CONFIG: &str = r#"
[[pins]]
query_terms   = ["game pass", "gamepass"]
name_terms    = ["game pass ultimate"]
related_terms = ["xbox", "game pass"]
floor         = 0.3
"#;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/catsearch/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub suggest: SuggestConfig,
    /// Extra synonym groups merged into the built-in table.
    #[serde(default)]
    pub synonyms: Vec<SynonymGroup>,
    /// Pinned-priority boost rules, evaluated in order.
    #[serde(default)]
    pub pins: Vec<PinRule>,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_word_match_weight")]
    pub word_match_weight: f64,
    #[serde(default = "default_prefix_window")]
    pub prefix_window: usize,
    #[serde(default = "default_name_contains_score")]
    pub name_contains_score: f64,
    #[serde(default = "default_name_contains_min_query_len")]
    pub name_contains_min_query_len: usize,
}

fn default_fuzzy_threshold() -> f64 { DEFAULT_FUZZY_THRESHOLD }
fn default_max_results() -> usize { DEFAULT_MAX_RESULTS }
fn default_word_match_weight() -> f64 { DEFAULT_WORD_MATCH_WEIGHT }
fn default_prefix_window() -> usize { DEFAULT_PREFIX_WINDOW }
fn default_name_contains_score() -> f64 { DEFAULT_NAME_CONTAINS_SCORE }
fn default_name_contains_min_query_len() -> usize { DEFAULT_NAME_CONTAINS_MIN_QUERY_LEN }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
            max_results: default_max_results(),
            word_match_weight: default_word_match_weight(),
            prefix_window: default_prefix_window(),
            name_contains_score: default_name_contains_score(),
            name_contains_min_query_len: default_name_contains_min_query_len(),
        }
    }
}

/// `[suggest]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestConfig {
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default = "default_min_input_len")]
    pub min_input_len: usize,
    #[serde(default = "default_suggest_prefix_len")]
    pub prefix_len: usize,
}

fn default_max_suggestions() -> usize { DEFAULT_MAX_SUGGESTIONS }
fn default_min_input_len() -> usize { DEFAULT_MIN_INPUT_LEN }
fn default_suggest_prefix_len() -> usize { DEFAULT_SUGGEST_PREFIX_LEN }

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            min_input_len: default_min_input_len(),
            prefix_len: default_suggest_prefix_len(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/catsearch/config.toml`, layered on top of the
    /// built-in defaults. A missing file is not an error.
    pub fn load() -> anyhow::Result<Self> {
        Self::layered(&config_path(), false)
    }

    /// Layer an explicit file on top of the built-in defaults. The file must
    /// exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::layered(path, true)
    }

    fn layered(path: &Path, required: bool) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_fields = [
            ("search.fuzzy_threshold", self.search.fuzzy_threshold),
            ("search.word_match_weight", self.search.word_match_weight),
            ("search.name_contains_score", self.search.name_contains_score),
        ];
        for (field, value) in unit_fields {
            check_unit(field, value)?;
        }
        for pin in &self.pins {
            if let Some(floor) = pin.floor {
                check_unit("pins.floor", floor)?;
            }
        }
        if self.search.max_results == 0 {
            return Err(ConfigError::Zero { field: "search.max_results" });
        }
        if self.suggest.max_suggestions == 0 {
            return Err(ConfigError::Zero { field: "suggest.max_suggestions" });
        }
        if self.suggest.prefix_len == 0 {
            return Err(ConfigError::Zero { field: "suggest.prefix_len" });
        }
        Ok(())
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("catsearch")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
