//! Synonym expansion.
//!
//! The built-in table is a compile-time [`phf::OrderedMap`] from a canonical
//! term to its variant spellings, abbreviations and brand names. At runtime it
//! is lifted into a [`SynonymTable`], optionally extended with groups from the
//! user config, and shared read-only for the life of the process.
//!
//! Every entry in the table is stored in normalised form so that containment
//! checks against a normalised query are plain substring tests.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::normalizer::{normalize, significant_words};

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

static BUILTIN: phf::OrderedMap<&'static str, &'static [&'static str]> = phf::phf_ordered_map! {
    // Platforms and storefronts
    "playstation" => &["ps4", "ps5", "psn", "playstation network", "playstation plus", "sony"],
    "xbox" => &["xbox live", "xbox one", "xbox series", "microsoft store"],
    "nintendo" => &["nintendo switch", "eshop", "nintendo eshop"],
    "steam" => &["valve", "steam wallet", "steam key"],
    "origin" => &["ea app", "ea play"],
    "battle net" => &["battlenet", "blizzard"],
    // Titles
    "call of duty" => &["cod", "modern warfare", "warzone", "black ops"],
    "fortnite" => &["v-bucks", "vbucks", "v bucks"],
    "fifa" => &["ea sports fc", "ea fc", "fut", "ultimate team"],
    "grand theft auto" => &["gta", "gta online", "shark card"],
    "pubg" => &["playerunknowns battlegrounds", "battlegrounds", "unknown cash"],
    "league of legends" => &["riot points", "lol"],
    "valorant" => &["valorant points", "radianite"],
    "roblox" => &["robux"],
    "minecraft" => &["minecoins"],
    "apex legends" => &["apex coins"],
    "genshin impact" => &["genshin", "genesis crystals"],
    // Categories
    "gift card" => &["giftcard", "voucher", "top-up", "topup"],
    "subscription" => &["membership", "game pass", "gamepass"],
    "dlc" => &["expansion", "add-on", "season pass"],
    "in-game currency" => &["coins", "gems", "credits"],
    // Localised terms
    "game" => &["games", "oyun", "oyunlar", "игра"],
    "card" => &["kart", "kartı", "karti", "карта"],
};

/// Process-wide table holding only the built-in groups.
static BUILTIN_TABLE: LazyLock<SynonymTable> = LazyLock::new(|| {
    SynonymTable::from_groups(BUILTIN.entries().map(|(canonical, variants)| SynonymGroup {
        canonical: (*canonical).to_string(),
        variants: variants.iter().map(|v| (*v).to_string()).collect(),
    }))
});

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// One canonical term and its variants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SynonymGroup {
    pub canonical: String,
    #[serde(default)]
    pub variants: Vec<String>,
}

impl SynonymGroup {
    fn normalized(&self) -> Self {
        let mut variants: Vec<String> = Vec::with_capacity(self.variants.len());
        for variant in self.variants.iter().map(|v| normalize(v)) {
            if !variant.is_empty() && !variants.contains(&variant) {
                variants.push(variant);
            }
        }
        Self {
            canonical: normalize(&self.canonical),
            variants,
        }
    }

    fn terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical.as_str()).chain(self.variants.iter().map(String::as_str))
    }

    fn triggered_by(&self, normalized_query: &str) -> bool {
        self.terms().any(|term| normalized_query.contains(term))
    }
}

/// Immutable canonical → variants mapping used by [`SynonymTable::expand`].
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    groups: Vec<SynonymGroup>,
}

impl SynonymTable {
    /// The compiled-in table.
    pub fn builtin() -> &'static SynonymTable {
        &BUILTIN_TABLE
    }

    /// Build a table from arbitrary groups. Entries are normalised; groups
    /// with an empty canonical term are dropped.
    pub fn from_groups(groups: impl IntoIterator<Item = SynonymGroup>) -> Self {
        let mut table = Self::default();
        table.merge(groups);
        table
    }

    /// The built-in table extended with `extra`. An extra group whose
    /// canonical term already exists adds its variants to that group.
    pub fn with_extra(extra: &[SynonymGroup]) -> Self {
        let mut table = Self::builtin().clone();
        table.merge(extra.iter().cloned());
        table
    }

    fn merge(&mut self, groups: impl IntoIterator<Item = SynonymGroup>) {
        for group in groups.into_iter().map(|g| g.normalized()) {
            if group.canonical.is_empty() {
                continue;
            }
            match self.groups.iter_mut().find(|g| g.canonical == group.canonical) {
                Some(existing) => {
                    for variant in group.variants {
                        if !existing.variants.contains(&variant) {
                            existing.variants.push(variant);
                        }
                    }
                }
                None => self.groups.push(group),
            }
        }
    }

    pub fn groups(&self) -> &[SynonymGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Expand a raw query into the set of terms a record may contain.
    ///
    /// The set always holds the normalised query itself, every member of each
    /// group the query mentions (by canonical term or by any variant), and the
    /// query's individual significant words.
    pub fn expand(&self, query: &str) -> ExpandedQuery {
        let normalized = normalize(query);
        let mut terms = BTreeSet::new();
        terms.insert(normalized.clone());

        if !normalized.is_empty() {
            for group in self.groups.iter().filter(|g| g.triggered_by(&normalized)) {
                terms.extend(group.terms().map(str::to_string));
            }
            terms.extend(significant_words(&normalized).map(str::to_string));
        }

        tracing::trace!(query = %normalized, terms = terms.len(), "expanded query");
        ExpandedQuery { normalized, terms }
    }
}

// ---------------------------------------------------------------------------
// Expanded query
// ---------------------------------------------------------------------------

/// The term set derived from one raw query. Lives for a single search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedQuery {
    normalized: String,
    terms: BTreeSet<String>,
}

impl ExpandedQuery {
    /// The normalised raw query the set was seeded with.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Terms that can carry match evidence. The empty seed of a blank query
    /// would be contained in every record, so it is never yielded.
    pub fn match_terms(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|term| !term.is_empty())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
