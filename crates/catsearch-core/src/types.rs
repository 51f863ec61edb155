//! Core types for catsearch-core.
//!
//! This module defines the data structures shared across the engine: the
//! read-only [`CatalogRecord`] supplied by the storage layer, the per-record
//! [`MatchResult`] produced by the fuzzy matcher, and the [`ScoredRecord`]
//! the ranker hands back for inspection.

use serde::{Deserialize, Deserializer, Serialize};

use crate::normalizer::normalize;

/// A searchable catalog entry.
///
/// The engine never mutates records; it only borrows them for the duration
/// of a search. Optional fields that are absent (or `null` in a snapshot)
/// behave exactly like empty strings during matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Display name. A record without one is searched as if the name were
    /// empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Storefront or console, e.g. "Steam", "PlayStation".
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl CatalogRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Normalised concatenation of every searchable field: name,
    /// description, platform, category, then tags.
    pub fn searchable_text(&self) -> String {
        let mut joined = String::with_capacity(self.name.len() + 64);
        joined.push_str(&self.name);
        for field in [&self.description, &self.platform, &self.category] {
            joined.push(' ');
            joined.push_str(field.as_deref().unwrap_or_default());
        }
        for tag in &self.tags {
            joined.push(' ');
            joined.push_str(tag);
        }
        normalize(&joined)
    }

    /// Normalised display name.
    pub fn normalized_name(&self) -> String {
        normalize(&self.name)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outcome of matching one record against an expanded query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub matches: bool,
    /// Relevance evidence in `[0, 1]`. `1.0` means exact containment.
    pub score: f64,
}

impl MatchResult {
    pub const EXACT: MatchResult = MatchResult {
        matches: true,
        score: 1.0,
    };

    pub const NONE: MatchResult = MatchResult {
        matches: false,
        score: 0.0,
    };
}

/// A record accepted by the ranker, together with the evidence used to
/// order it. Only lives for the duration of one search call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecord<'a> {
    pub record: &'a CatalogRecord,
    pub score: f64,
    /// Set when a pinned-priority boost rule claimed this record.
    pub pinned: bool,
    /// Set when the normalised name equals the normalised query.
    pub exact_name: bool,
}
