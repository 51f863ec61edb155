//! File source — reads a snapshot from disk.

use std::path::PathBuf;

use catsearch_core::CatalogRecord;

use crate::{parse_snapshot, CatalogError, CatalogSource};

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            source_name: self.describe(),
            source,
        })?;
        let records = parse_snapshot(&text)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "loaded catalog");
        Ok(records)
    }
}
