//! Test builders — ergonomic constructors for `CatalogRecord` fixtures.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use catsearch::CatalogRecord;
use proptest_derive::Arbitrary;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`CatalogRecord`] test fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new("Fortnite V-Bucks 1000")
///     .platform("Epic Games")
///     .category("In-game currency")
///     .tag("vbucks")
///     .build();
/// ```
pub struct RecordBuilder {
    record: CatalogRecord,
}

impl RecordBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            record: CatalogRecord::new(name),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.record.description = Some(description.into());
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.record.platform = Some(platform.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.record.category = Some(category.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.record.tags.push(tag.into());
        self
    }

    pub fn build(self) -> CatalogRecord {
        self.record
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A record with only a name.
pub fn named(name: &str) -> CatalogRecord {
    CatalogRecord::new(name)
}

/// A record with a name and platform.
pub fn on_platform(name: &str, platform: &str) -> CatalogRecord {
    RecordBuilder::new(name).platform(platform).build()
}

/// Records from a list of names, in order.
pub fn catalog_of(names: &[&str]) -> Vec<CatalogRecord> {
    names.iter().map(|n| named(n)).collect()
}

/// Names of a result list, for compact assertions.
pub fn names<'a>(results: &[&'a CatalogRecord]) -> Vec<&'a str> {
    results.iter().map(|r| r.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Property-test records
// ---------------------------------------------------------------------------

/// Arbitrary record shape for proptest. Field alphabets are kept small so
/// random queries overlap with random catalogs often enough to matter.
#[derive(Debug, Clone, Arbitrary)]
pub struct ArbRecord {
    #[proptest(regex = "[A-Za-z0-9 :€-]{0,24}")]
    pub name: String,
    #[proptest(strategy = "proptest::option::of(\"[a-z ]{0,16}\")")]
    pub description: Option<String>,
    #[proptest(strategy = "proptest::option::of(\"(Steam|Origin|PSN|Xbox)\")")]
    pub platform: Option<String>,
    #[proptest(strategy = "proptest::option::of(\"[a-z]{3,8}\")")]
    pub category: Option<String>,
    #[proptest(strategy = "proptest::collection::vec(\"[a-z]{1,8}\", 0..3)")]
    pub tags: Vec<String>,
}

impl From<ArbRecord> for CatalogRecord {
    fn from(arb: ArbRecord) -> Self {
        CatalogRecord {
            name: arb.name,
            description: arb.description,
            platform: arb.platform,
            category: arb.category,
            tags: arb.tags,
        }
    }
}
