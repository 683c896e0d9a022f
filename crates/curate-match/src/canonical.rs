//! Column canonicalization against a per-type schema.
//!
//! Three deterministic passes: structural normalization, exact-or-fuzzy
//! renaming to the canonical vocabulary, and collision resolution that is
//! aware of the repeatable set. Re-running on the output is a fixed point.

use std::collections::BTreeSet;

use tracing::debug;

use curate_model::CanonicalSchema;

use crate::normalize::{disambiguate, normalize_headers};
use crate::score::{MATCH_THRESHOLD, best_match};

/// Canonicalize a header for the given schema.
///
/// Returns the final column names in order; the caller applies them to the
/// table. Names that match nothing canonical stay in normalized form.
pub fn canonicalize_columns(headers: &[String], schema: &CanonicalSchema) -> Vec<String> {
    let normalized = normalize_headers(headers);

    let mut mapped: Vec<String> = normalized
        .iter()
        .map(|name| map_to_canonical(name, schema))
        .collect();

    // Fold suffixed variants of repeatable columns back to the bare root
    // before collision resolution, so `start_date_eng` and `start_date_2`
    // land in the same ordinal sequence.
    for name in &mut mapped {
        if let Some(root) = repeatable_root(name, &schema.repeatable) {
            *name = root;
        }
    }

    disambiguate(&mapped, &schema.repeatable)
}

/// Rename one normalized column to its canonical form.
///
/// Exact canonical names win outright; otherwise the best similarity score
/// at or above [`MATCH_THRESHOLD`] decides, and below it the normalized
/// name is kept.
fn map_to_canonical(name: &str, schema: &CanonicalSchema) -> String {
    if schema.columns.iter().any(|canonical| canonical == name) {
        return name.to_string();
    }
    match best_match(name, schema.columns.iter().map(String::as_str)) {
        Some((canonical, score)) if score >= MATCH_THRESHOLD => {
            debug!(column = name, canonical, score, "fuzzy column rename");
            canonical.to_string()
        }
        _ => name.to_string(),
    }
}

/// If `name` is a repeatable root plus `_eng`/`_N` style suffixes, return
/// the bare root.
fn repeatable_root(name: &str, repeatable: &BTreeSet<String>) -> Option<String> {
    for root in repeatable {
        if name == root {
            return Some(root.clone());
        }
        if let Some(rest) = name.strip_prefix(root.as_str())
            && is_variant_suffix(rest)
        {
            return Some(root.clone());
        }
    }
    None
}

/// True for suffixes made of `eng` and numeric parts: `_eng`, `_2`,
/// `_eng_3`, `eng`, `2`.
fn is_variant_suffix(rest: &str) -> bool {
    let parts: Vec<&str> = rest.split('_').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return false;
    }
    parts
        .iter()
        .all(|part| *part == "eng" || part.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use curate_model::{CurationConfig, FileTypeLabel};

    fn patients_schema() -> CanonicalSchema {
        CurationConfig::builtin()
            .schema_for(FileTypeLabel::Patients)
            .cloned()
            .expect("builtin patients schema")
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn exact_canonical_names_pass_through() {
        let schema = patients_schema();
        let result = canonicalize_columns(&headers(&["patient_id", "age", "gender"]), &schema);
        assert_eq!(result, vec!["patient_id", "age", "gender"]);
    }

    #[test]
    fn messy_exports_are_renamed() {
        let schema = patients_schema();
        let result = canonicalize_columns(
            &headers(&["Patient ID", "AGE ", "First-Transplant Date", "Stem Cell Source"]),
            &schema,
        );
        assert_eq!(
            result,
            vec!["patient_id", "age", "first_transplant_date", "stem_cell_source"]
        );
    }

    #[test]
    fn unmatched_names_keep_their_normalized_form() {
        let schema = patients_schema();
        let result = canonicalize_columns(&headers(&["Ciprofloxin", "Ciprofloxin_Eng"]), &schema);
        assert_eq!(result, vec!["ciprofloxin", "ciprofloxin_eng"]);
    }

    #[test]
    fn repeatable_variants_fold_and_number_by_ordinal() {
        let schema = patients_schema();
        let result = canonicalize_columns(
            &headers(&["Start_Date", "End_Date", "Start_DateEng", "End_Date_Eng"]),
            &schema,
        );
        assert_eq!(
            result,
            vec!["start_date", "end_date", "start_date_2", "end_date_2"]
        );
    }

    #[test]
    fn non_repeatable_collisions_use_duplicate_counters() {
        let schema = patients_schema();
        let result = canonicalize_columns(&headers(&["Age", "age", "AGE"]), &schema);
        assert_eq!(result, vec!["age", "age_1", "age_2"]);
    }

    #[test]
    fn canonicalization_is_a_fixed_point_on_its_own_output() {
        let schema = patients_schema();
        let input = headers(&[
            "Patient ID",
            "Ciprofloxin",
            "Start_Date",
            "End_Date",
            "Ciprofloxin_Eng",
            "Start_DateEng",
            "End_DateEng",
            "First_Transplant_Date",
        ]);
        let once = canonicalize_columns(&input, &schema);
        let twice = canonicalize_columns(&once, &schema);
        assert_eq!(once, twice);
    }

    #[test]
    fn canonicalization_is_deterministic() {
        let schema = patients_schema();
        let input = headers(&["Patient ID", "Start_Date", "Start Date", "start-date"]);
        assert_eq!(
            canonicalize_columns(&input, &schema),
            canonicalize_columns(&input, &schema)
        );
    }

    #[test]
    fn variant_suffix_shapes() {
        assert!(is_variant_suffix("_eng"));
        assert!(is_variant_suffix("_2"));
        assert!(is_variant_suffix("_eng_10"));
        assert!(is_variant_suffix("eng"));
        assert!(!is_variant_suffix(""));
        assert!(!is_variant_suffix("_s"));
        assert!(!is_variant_suffix("_engine"));
    }
}
