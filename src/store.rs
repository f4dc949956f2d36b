//! Dedup/export store: tabular persistence for scraped records
//!
//! One CSV file, fixed 7-column header, one body row per record. Saves use a
//! clear-then-rewrite policy: the body is fully replaced from the in-memory
//! record set so repeated runs against the same path never accumulate stale
//! duplicates. The seen-links query exposes the `Link` column for a future
//! incremental caller; the orchestrator does not consult it.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::scrape::JobRecord;

/// Fixed output header, written first on every save.
pub const HEADER: [&str; 7] = [
    "Title",
    "Company",
    "Location",
    "Date",
    "Description",
    "Link",
    "E_Link",
];

/// Zero-based column index of the deduplication key.
const LINK_COLUMN: usize = 5;

/// Persist `records` to `path`, replacing any previous body entirely.
///
/// The header row is always present, even for an empty record set. Parent
/// directories are created as needed.
pub fn save(records: &[JobRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to open output file {}", path.display()))?;

    writer
        .write_record(HEADER)
        .context("Failed to write output header")?;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write record for {}", record.link))?;
    }
    writer.flush().context("Failed to flush output file")?;

    info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Links already present in the stored table.
///
/// Returns an empty set when the file does not exist yet. Blank link cells
/// are skipped; an empty string is the "not found" marker, not a real link.
pub fn load_seen_links(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open stored table {}", path.display()))?;

    let mut seen = HashSet::new();
    for row in reader.records() {
        let row = row.with_context(|| format!("Failed to read row from {}", path.display()))?;
        if let Some(link) = row.get(LINK_COLUMN)
            && !link.is_empty()
        {
            seen.insert(link.to_string());
        }
    }
    Ok(seen)
}
