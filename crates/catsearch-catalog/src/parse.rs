//! Snapshot decoding — JSON array or JSON Lines, detected from the first
//! non-whitespace byte.

use catsearch_core::CatalogRecord;

use crate::CatalogError;

/// Decode a snapshot. Blank input is an empty catalog.
pub fn parse_snapshot(text: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    parse_json_lines(text)
}

fn parse_json_lines(text: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|source| CatalogError::JsonLine {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
