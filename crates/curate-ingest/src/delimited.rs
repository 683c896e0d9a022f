//! Delimited-text reading and writing.
//!
//! Human exports arrive as CSV or TSV with inconsistent extensions, so the
//! reader sniffs the delimiter from the header line before parsing. Cells
//! are trimmed and BOM-stripped on the way in; fully empty rows are
//! dropped; ragged rows are squared to the header width. The writer
//! re-emits with the same delimiter, preserving column order exactly.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use curate_model::Table;

use crate::error::{IngestError, Result};

/// Delimiters the sniffer considers, in tie-break priority order.
const CANDIDATE_DELIMITERS: [u8; 3] = [b'\t', b';', b','];

/// Pick the delimiter with the most occurrences in the header line.
/// Falls back to comma when nothing matches.
pub fn detect_delimiter(header_line: &str) -> u8 {
    let mut best = b',';
    let mut best_count = 0usize;
    for candidate in CANDIDATE_DELIMITERS {
        let count = header_line.bytes().filter(|b| *b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a delimited table, returning the table and the detected delimiter.
pub fn read_table(path: &Path) -> Result<(Table, u8)> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let header_line = contents.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(header_line);
    debug!(
        path = %path.display(),
        delimiter = %(delimiter as char),
        "detected delimiter"
    );

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(contents.as_bytes());

    let mut records = reader.records();
    let columns: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|e| IngestError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .iter()
            .map(normalize_cell)
            .collect(),
        None => Vec::new(),
    };

    let mut table = Table::new(columns);
    for record in records {
        let record = record.map_err(|e| IngestError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        table.push_row(row);
    }
    Ok((table, delimiter))
}

/// Write a table with the given delimiter.
pub fn write_table(path: &Path, table: &Table, delimiter: u8) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| IngestError::FileWrite {
            path: path.to_path_buf(),
            source: std::io::Error::other(e.to_string()),
        })?;
    writer
        .write_record(&table.columns)
        .and_then(|()| {
            for row in &table.rows {
                writer.write_record(row)?;
            }
            writer.flush().map_err(csv::Error::from)
        })
        .map_err(|e| IngestError::FileWrite {
            path: path.to_path_buf(),
            source: std::io::Error::other(e.to_string()),
        })
}
