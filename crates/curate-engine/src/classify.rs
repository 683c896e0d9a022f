//! File-type classification.
//!
//! Named schemas are tested in the configured priority order; a schema
//! matches when its identifier columns are a case-insensitive subset of
//! the table's columns. Only when no named schema matches does the
//! numeric-content heuristic run, so a table that satisfies both is always
//! classified by the named schema.

use std::collections::BTreeSet;

use tracing::debug;

use curate_model::{CurationConfig, FileTypeLabel, Table};

/// Rows sampled by the numeric-content heuristic.
const NUMERIC_SAMPLE_ROWS: usize = 20;

/// Classify a table against the configured schemas.
pub fn classify(table: &Table, config: &CurationConfig) -> FileTypeLabel {
    if table.columns.is_empty() {
        return FileTypeLabel::Error;
    }

    let columns: BTreeSet<String> = table.columns.iter().map(|c| c.to_lowercase()).collect();

    for schema in &config.schemas {
        // A schema without identifiers can never match by name; bracken is
        // recognized by content instead.
        if schema.identifiers.is_empty() {
            continue;
        }
        let matched = schema
            .identifiers
            .iter()
            .all(|identifier| columns.contains(&identifier.to_lowercase()));
        if matched {
            debug!(file_type = %schema.file_type, "matched named schema");
            return schema.file_type;
        }
    }

    if numeric_sample_is_clean(table) && config.schema_for(FileTypeLabel::Bracken).is_some() {
        return FileTypeLabel::Bracken;
    }

    FileTypeLabel::Unknown
}

/// True when every non-empty cell in the sample parses as a number.
///
/// The sample starts at the second data row: the first row of abundance
/// exports is commonly a non-numeric label row.
fn numeric_sample_is_clean(table: &Table) -> bool {
    for row in table.rows.iter().skip(1).take(NUMERIC_SAMPLE_ROWS) {
        for cell in row {
            let value = cell.trim();
            if value.is_empty() {
                continue;
            }
            if value.parse::<f64>().is_err() {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CurationConfig {
        CurationConfig::builtin()
    }

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table::with_rows(
            columns.iter().map(|c| (*c).to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn patients_match_is_case_insensitive() {
        let t = table(
            &["Patient_ID", "AGE", "Gender", "Race", "Diagnosis"],
            &[&["p1", "40", "M", "White", "AML"]],
        );
        assert_eq!(classify(&t, &config()), FileTypeLabel::Patients);
    }

    #[test]
    fn taxonomy_matches_by_identifiers() {
        let t = table(
            &["taxonomy_id", "genus", "species"],
            &[&["811", "Collinsella", "aerofaciens"]],
        );
        assert_eq!(classify(&t, &config()), FileTypeLabel::Taxonomy);
    }

    #[test]
    fn numeric_matrix_is_bracken() {
        let t = table(
            &["sample_1", "sample_2"],
            &[
                &["label_row", "also_text"],
                &["0.25", "1200"],
                &["0.5", "80"],
            ],
        );
        assert_eq!(classify(&t, &config()), FileTypeLabel::Bracken);
    }

    #[test]
    fn numeric_sample_tolerates_empty_cells() {
        let t = table(
            &["s1", "s2"],
            &[&["header-ish", "x"], &["1.5", ""], &["", "2"]],
        );
        assert_eq!(classify(&t, &config()), FileTypeLabel::Bracken);
    }

    #[test]
    fn text_content_is_unknown() {
        let t = table(
            &["col_a", "col_b"],
            &[&["x", "y"], &["notes", "free text"], &["1", "two"]],
        );
        assert_eq!(classify(&t, &config()), FileTypeLabel::Unknown);
    }

    #[test]
    fn named_schema_beats_numeric_heuristic() {
        // All-numeric rows, but the patients identifiers are present:
        // priority order classifies this as patients, not bracken.
        let t = table(
            &["patient_id", "age", "gender", "race"],
            &[&["1", "40", "1", "2"], &["2", "55", "2", "1"], &["3", "61", "1", "1"]],
        );
        assert_eq!(classify(&t, &config()), FileTypeLabel::Patients);
    }

    #[test]
    fn headerless_table_is_an_error() {
        let t = Table::new(Vec::new());
        assert_eq!(classify(&t, &config()), FileTypeLabel::Error);
    }
}
