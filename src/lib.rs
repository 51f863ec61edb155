//! catsearch — fuzzy, synonym-aware catalog search.
//!
//! This crate re-exports the engine and the snapshot loaders so that
//! integration tests and benchmarks can import everything from one place.
//!
//! # Architecture
//!
//! ```text
//! Catalog source ──► Vec<CatalogRecord> ──► Ranker ──► ranked records
//!                           │
//!                           └─────────────► SuggestionIndex ──► suggestions
//! ```
//!
//! The engine never owns the records: callers load a snapshot once and pass
//! it by reference to as many concurrent searches as they like.

pub use catsearch_core::*;

pub mod catalog {
    pub use catsearch_catalog::*;
}
