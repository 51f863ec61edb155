//! catsearch-catalog — catalog snapshot sources for catsearch.
//!
//! Each source reads a serialized catalog and hands back the in-memory
//! `Vec<CatalogRecord>` snapshot the engine searches. Two encodings are
//! accepted: a single JSON array of records, or JSON Lines with one record
//! per line. Records missing a name are kept with an empty name; the engine
//! treats absent fields as empty.

pub mod file;
pub mod parse;
pub mod stdin;

use catsearch_core::CatalogRecord;

pub use file::FileSource;
pub use parse::parse_snapshot;
pub use stdin::StdinSource;

/// Errors raised while loading a snapshot. The search engine itself never
/// fails; only getting records into memory can.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog from {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not a valid JSON array of records: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog line {line} is not a valid record: {source}")]
    JsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Implemented by every snapshot source.
pub trait CatalogSource {
    /// Human-readable origin, used in logs and errors.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Vec<CatalogRecord>, CatalogError>;
}

/// `-` means stdin, anything else is a file path.
pub fn source_for(spec: &str) -> Box<dyn CatalogSource> {
    if spec == "-" {
        Box::new(StdinSource)
    } else {
        Box::new(FileSource::new(spec))
    }
}
