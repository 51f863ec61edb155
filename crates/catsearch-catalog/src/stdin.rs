//! Stdin source — reads a snapshot piped into the process.

use std::io::Read;

use catsearch_core::CatalogRecord;

use crate::{parse_snapshot, CatalogError, CatalogSource};

#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

impl CatalogSource for StdinSource {
    fn describe(&self) -> String {
        "stdin".to_string()
    }

    fn load(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        let mut text = String::new();
        std::io::stdin()
            .lock()
            .read_to_string(&mut text)
            .map_err(|source| CatalogError::Io {
                source_name: self.describe(),
                source,
            })?;
        let records = parse_snapshot(&text)?;
        tracing::debug!(records = records.len(), "loaded catalog from stdin");
        Ok(records)
    }
}
