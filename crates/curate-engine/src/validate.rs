//! Structural row and value sanitization.
//!
//! One validator, driven by per-type rule tables: the schema supplies the
//! identifier columns for row validity, the config supplies the sentinel
//! set and missing marker for value scrubbing. Row removal runs before
//! scrubbing, so sentinel-driven emptiness cannot retroactively invalidate
//! rows that were already kept.

use std::collections::BTreeSet;

use tracing::debug;

use curate_model::{CanonicalSchema, ColumnIndex, CurationConfig, Table};

/// Value-scrubbing rules derived from the configuration.
#[derive(Debug, Clone, Copy)]
pub struct ValueRules<'a> {
    sentinels: &'a BTreeSet<String>,
    marker: &'a str,
}

impl<'a> ValueRules<'a> {
    pub fn from_config(config: &'a CurationConfig) -> Self {
        Self {
            sentinels: &config.missing_sentinels,
            marker: &config.missing_marker,
        }
    }

    fn is_missing(&self, cell: &str) -> bool {
        self.sentinels.contains(&cell.to_lowercase())
    }
}

/// Drop rows whose identifier columns are all empty after trimming.
///
/// Identifier columns resolve case-insensitively against the header.
/// Returns `Some(removed_count)`, or `None` when the schema declares no
/// identifier columns or none resolve: the step is then a documented
/// no-op.
pub fn remove_invalid_rows(table: &mut Table, schema: &CanonicalSchema) -> Option<usize> {
    let index = ColumnIndex::new(table);
    let resolved: Vec<usize> = schema
        .identifiers
        .iter()
        .filter_map(|identifier| index.get(identifier))
        .collect();
    if resolved.is_empty() {
        debug!(file_type = %schema.file_type, "no identifier columns resolved");
        return None;
    }

    let before = table.row_count();
    table.rows.retain(|row| {
        resolved
            .iter()
            .any(|&column| row.get(column).is_some_and(|cell| !cell.trim().is_empty()))
    });
    Some(before - table.row_count())
}

/// Normalize sentinel "missing" tokens to the canonical marker and trim
/// every other cell. Returns the number of cells normalized to the marker.
pub fn scrub_values(table: &mut Table, rules: ValueRules<'_>) -> usize {
    let mut scrubbed = 0usize;
    for row in &mut table.rows {
        for cell in row {
            let trimmed = cell.trim();
            if rules.is_missing(trimmed) {
                if cell.as_str() != rules.marker {
                    *cell = rules.marker.to_string();
                    scrubbed += 1;
                }
            } else if trimmed.len() != cell.len() {
                *cell = trimmed.to_string();
            }
        }
    }
    scrubbed
}
