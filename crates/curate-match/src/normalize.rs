//! Structural normalization of raw column names.
//!
//! Normalization is lossy and deterministic: whatever casing, spacing and
//! punctuation a human export carries, the result is a `[0-9a-z_]` token.

use std::collections::{BTreeMap, BTreeSet};

/// Fallback name for a column whose normalized form is empty.
const EMPTY_COLUMN_NAME: &str = "column";

/// Normalize one raw column name.
///
/// Lower-cases, trims, maps internal whitespace and hyphens to `_`, drops
/// every character outside `[0-9a-z_]`, collapses repeated underscores and
/// falls back to `column` for names that vanish entirely.
pub fn normalize_column(raw: &str) -> String {
    let mut mapped = String::with_capacity(raw.len());
    for ch in raw.trim().to_lowercase().chars() {
        if ch.is_whitespace() || ch == '-' {
            mapped.push('_');
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
            mapped.push(ch);
        }
    }

    let mut collapsed = String::with_capacity(mapped.len());
    let mut previous_underscore = false;
    for ch in mapped.chars() {
        if ch == '_' {
            if previous_underscore {
                continue;
            }
            previous_underscore = true;
        } else {
            previous_underscore = false;
        }
        collapsed.push(ch);
    }

    if collapsed.is_empty() {
        EMPTY_COLUMN_NAME.to_string()
    } else {
        collapsed
    }
}

/// Normalize a full header and make the result collision-free.
pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_column(h)).collect();
    disambiguate(&normalized, &BTreeSet::new())
}

/// Resolve duplicate names with numeric suffixes, in column order.
///
/// Non-repeatable names keep the first occurrence bare and suffix later
/// duplicates `_1`, `_2`, …. Repeatable names keep the first occurrence
/// bare and number later occurrences by ordinal: `_2`, `_3`, …. Generated
/// names are guaranteed unique even against literal `_N` headers: the
/// counter bumps past anything already emitted.
pub fn disambiguate(names: &[String], repeatable: &BTreeSet<String>) -> Vec<String> {
    let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        let seen = occurrences.entry(name.as_str()).or_insert(0);
        *seen += 1;
        let mut candidate = suffixed(name, *seen, repeatable);
        while used.contains(&candidate) {
            *seen += 1;
            candidate = suffixed(name, *seen, repeatable);
        }
        used.insert(candidate.clone());
        resolved.push(candidate);
    }
    resolved
}

fn suffixed(name: &str, occurrence: usize, repeatable: &BTreeSet<String>) -> String {
    if occurrence == 1 {
        name.to_string()
    } else if repeatable.contains(name) {
        format!("{name}_{occurrence}")
    } else {
        format!("{name}_{}", occurrence - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{ProptestConfig, any, proptest};

    #[test]
    fn normalize_handles_spacing_case_and_punctuation() {
        assert_eq!(normalize_column("  Patient ID "), "patient_id");
        assert_eq!(normalize_column("First-Transplant Date"), "first_transplant_date");
        assert_eq!(normalize_column("Age (years)"), "age_years");
        assert_eq!(normalize_column("reads__per__sample"), "reads_per_sample");
    }

    #[test]
    fn normalize_falls_back_for_empty_names() {
        assert_eq!(normalize_column(""), "column");
        assert_eq!(normalize_column("%%%"), "column");
    }

    #[test]
    fn normalized_unique_headers_are_untouched() {
        let headers: Vec<String> = ["patient_id", "age", "gender"]
            .iter()
            .map(|h| (*h).to_string())
            .collect();
        assert_eq!(normalize_headers(&headers), headers);
    }

    #[test]
    fn duplicate_headers_get_numeric_suffixes_in_order() {
        let headers: Vec<String> = ["Dose", "dose", "DOSE"]
            .iter()
            .map(|h| (*h).to_string())
            .collect();
        assert_eq!(normalize_headers(&headers), vec!["dose", "dose_1", "dose_2"]);
    }

    #[test]
    fn generated_suffixes_never_collide_with_literal_headers() {
        let names: Vec<String> = ["dose", "dose", "dose_1"]
            .iter()
            .map(|n| (*n).to_string())
            .collect();
        let resolved = disambiguate(&names, &BTreeSet::new());
        assert_eq!(resolved, vec!["dose", "dose_1", "dose_1_1"]);
        let unique: BTreeSet<&String> = resolved.iter().collect();
        assert_eq!(unique.len(), resolved.len());
    }

    #[test]
    fn repeatable_names_are_numbered_by_ordinal() {
        let repeatable: BTreeSet<String> = ["start_date".to_string()].into_iter().collect();
        let names: Vec<String> = ["start_date", "start_date", "start_date"]
            .iter()
            .map(|n| (*n).to_string())
            .collect();
        assert_eq!(
            disambiguate(&names, &repeatable),
            vec!["start_date", "start_date_2", "start_date_3"]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn normalize_is_idempotent(raw in any::<String>()) {
            let once = normalize_column(&raw);
            assert_eq!(normalize_column(&once), once);
        }

        #[test]
        fn normalize_is_deterministic(raw in any::<String>()) {
            assert_eq!(normalize_column(&raw), normalize_column(&raw));
        }

        #[test]
        fn normalize_output_alphabet(raw in any::<String>()) {
            let normalized = normalize_column(&raw);
            assert!(
                normalized
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            );
        }
    }
}
