//! Temporal medication reconciliation for patients tables.
//!
//! Clinical exports duplicate each drug as a native and an `_eng`
//! (translated) indicator group, and administration tightly straddling the
//! reference transplant date is a known confound. Per registry drug: zero
//! indicators whose start/end dates land inside the peri-transplant
//! window, OR-merge the native and `_eng` indicators under the drug's
//! lower-case name, and drop the source indicator and date columns.

use chrono::NaiveDate;
use tracing::debug;

use curate_model::{ColumnIndex, CurationConfig, CurationError, Result, Table};

/// Column positions for one indicator variant.
#[derive(Debug, Clone, Copy)]
struct VariantColumns {
    indicator: usize,
    dates: Option<(usize, usize)>,
}

/// Locate an indicator's start/end date columns.
///
/// By position only: the two columns immediately following the indicator.
/// Paired date columns are unreliably named in source data, so name-based
/// lookup is deliberately not attempted here. Returns `None` when the
/// table is too narrow for a full pair.
pub fn locate_paired_dates(table: &Table, indicator: usize) -> Option<(usize, usize)> {
    let start = indicator + 1;
    let end = indicator + 2;
    (end < table.column_count()).then_some((start, end))
}

/// Reconcile every registry drug against the reference transplant date.
///
/// Returns a new table; the input is untouched, so a failing run leaves
/// the caller's table exactly as it was.
pub fn reconcile_medications(table: &Table, config: &CurationConfig) -> Result<Table> {
    let mut working = table.clone();
    for drug in config.drug_registry.iter_drugs() {
        reconcile_drug(&mut working, drug, config)?;
    }
    Ok(working)
}

fn reconcile_drug(table: &mut Table, drug: &str, config: &CurationConfig) -> Result<()> {
    // Fresh lookup for every drug: the previous drug's cleanup removed
    // columns and shifted every position after them.
    let index = ColumnIndex::new(table);
    let Some(reference_column) = index.get(&config.reference_date_column) else {
        return Err(CurationError::MissingReferenceColumn {
            column: config.reference_date_column.clone(),
        });
    };

    let target = drug.to_lowercase();
    let native = index.get(&target).map(|indicator| VariantColumns {
        indicator,
        dates: locate_paired_dates(table, indicator),
    });
    let eng = index
        .get(&format!("{target}_eng"))
        .map(|indicator| VariantColumns {
            indicator,
            dates: locate_paired_dates(table, indicator),
        });

    // Nothing in this table mentions the drug at all.
    if native.is_none() && eng.is_none() {
        return Ok(());
    }

    let format = config.date_format.as_str();
    let window = chrono::Duration::days(config.window_days);
    let mut merged = Vec::with_capacity(table.row_count());
    for row in &table.rows {
        let reference = parse_date(row.get(reference_column).map(String::as_str), format);
        // A variant that is absent behaves as an all-zero indicator
        // column, so the merge logic stays uniform.
        let native_flag = variant_flag(row, native, reference, window, format);
        let eng_flag = variant_flag(row, eng, reference, window, format);
        let positive = native_flag || eng_flag;
        merged.push(if positive { "1" } else { "0" }.to_string());
    }

    let target_position = table.column_position(&target);
    let mut removals: Vec<usize> = Vec::new();
    for variant in [native, eng].into_iter().flatten() {
        removals.push(variant.indicator);
        if let Some((start, end)) = variant.dates {
            removals.push(start);
            removals.push(end);
        }
    }
    debug!(drug = %target, removed_columns = removals.len(), "reconciled drug");

    if let Some(position) = target_position {
        // The merge target already exists under its canonical name: write
        // in place, then drop the other located columns.
        removals.retain(|&column| column != position);
        for (row_index, value) in merged.into_iter().enumerate() {
            table.set_cell(row_index, position, value);
        }
        table.remove_columns(&removals);
    } else {
        table.remove_columns(&removals);
        table.append_column(target, merged);
    }
    Ok(())
}

/// Evaluate one variant's indicator for a row, window-adjusted.
///
/// The indicator survives as `1` unless it sits inside the peri-transplant
/// window: start within `[reference - window, reference]` and end within
/// `[reference, reference + window]`, all bounds inclusive. Missing or
/// unparseable dates exclude the row from window matching; an indicator is
/// never zeroed without a full set of valid dates.
fn variant_flag(
    row: &[String],
    variant: Option<VariantColumns>,
    reference: Option<NaiveDate>,
    window: chrono::Duration,
    format: &str,
) -> bool {
    let Some(variant) = variant else {
        return false;
    };
    if !is_positive(row.get(variant.indicator).map(String::as_str)) {
        return false;
    }
    let Some(reference) = reference else {
        return true;
    };
    let Some((start_column, end_column)) = variant.dates else {
        return true;
    };
    let start = parse_date(row.get(start_column).map(String::as_str), format);
    let end = parse_date(row.get(end_column).map(String::as_str), format);
    match (start, end) {
        (Some(start), Some(end)) => {
            let in_window = start >= reference - window
                && start <= reference
                && end >= reference
                && end <= reference + window;
            !in_window
        }
        _ => true,
    }
}

fn is_positive(cell: Option<&str>) -> bool {
    cell.and_then(|c| c.trim().parse::<f64>().ok())
        .is_some_and(|value| value == 1.0)
}

fn parse_date(cell: Option<&str>, format: &str) -> Option<NaiveDate> {
    let text = cell?.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, format).ok()
}
