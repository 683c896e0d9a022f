#![deny(unsafe_code)]

use std::collections::BTreeSet;

use crate::file_type::FileTypeLabel;

/// Per-type canonical column vocabulary.
///
/// `identifiers` is the subset whose non-emptiness makes a row valid and
/// whose presence (case-insensitive) classifies a table as this type.
/// `repeatable` names the canonical columns allowed to occur more than
/// once after canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanonicalSchema {
    pub file_type: FileTypeLabel,
    pub columns: Vec<String>,
    #[serde(default)]
    pub identifiers: Vec<String>,
    #[serde(default)]
    pub repeatable: BTreeSet<String>,
}

impl CanonicalSchema {
    pub fn new(file_type: FileTypeLabel, columns: &[&str], identifiers: &[&str]) -> Self {
        Self {
            file_type,
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            identifiers: identifiers.iter().map(|c| (*c).to_string()).collect(),
            repeatable: BTreeSet::new(),
        }
    }

    pub fn with_repeatable(mut self, repeatable: &[&str]) -> Self {
        self.repeatable = repeatable.iter().map(|c| (*c).to_string()).collect();
        self
    }
}

/// One drug group in the registry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DrugGroup {
    pub label: String,
    pub drugs: Vec<String>,
}

/// Drug-group label to ordered drug identifiers. Consumed only by the
/// medication reconciler; iteration order is the declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DrugRegistry {
    pub groups: Vec<DrugGroup>,
}

impl DrugRegistry {
    pub fn group(label: &str, drugs: &[&str]) -> DrugGroup {
        DrugGroup {
            label: label.to_string(),
            drugs: drugs.iter().map(|d| (*d).to_string()).collect(),
        }
    }

    /// All drug identifiers across groups, in declaration order.
    pub fn iter_drugs(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.drugs.iter().map(String::as_str))
    }
}

/// Immutable configuration for one curation run.
///
/// Injected per call; the engine holds no state of its own across
/// invocations.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurationConfig {
    /// Schemas in classification priority order.
    pub schemas: Vec<CanonicalSchema>,
    pub drug_registry: DrugRegistry,
    /// Lower-cased tokens treated as missing on top of pre-existing markers.
    pub missing_sentinels: BTreeSet<String>,
    /// The canonical missing marker every sentinel is normalized to.
    pub missing_marker: String,
    /// Reference date column for the medication window rule.
    pub reference_date_column: String,
    /// Half-width of the peri-transplant window, in whole days.
    pub window_days: i64,
    /// `chrono` format string for reconciler date parsing.
    pub date_format: String,
}

impl CurationConfig {
    /// The shipped configuration: patients, taxonomy and bracken schemas
    /// plus the peri-transplant drug registry.
    pub fn builtin() -> Self {
        let patients = CanonicalSchema::new(
            FileTypeLabel::Patients,
            &[
                "patient_id",
                "age",
                "gender",
                "race",
                "ethnicity",
                "diagnosis",
                "donor_type",
                "stem_cell_source",
                "first_transplant_date",
                "start_date",
                "end_date",
            ],
            &["patient_id", "age", "gender", "race"],
        )
        .with_repeatable(&["start_date", "end_date"]);

        let taxonomy = CanonicalSchema::new(
            FileTypeLabel::Taxonomy,
            &[
                "taxonomy_id",
                "domain",
                "phylum",
                "class",
                "order",
                "family",
                "genus",
                "species",
            ],
            &["taxonomy_id", "species"],
        );

        // Bracken abundance exports carry no stable identifier columns;
        // they are recognized by numeric content instead.
        let bracken = CanonicalSchema::new(
            FileTypeLabel::Bracken,
            &[
                "name",
                "taxonomy_id",
                "taxonomy_lvl",
                "kraken_assigned_reads",
                "added_reads",
                "new_est_reads",
                "fraction_total_reads",
            ],
            &[],
        );

        let drug_registry = DrugRegistry {
            groups: vec![
                DrugRegistry::group(
                    "antibacterials",
                    &[
                        "ciprofloxin",
                        "levofloxacin",
                        "metronidazole",
                        "vancomycin",
                        "meropenem",
                        "cefepime",
                        "piperacillin_tazobactam",
                    ],
                ),
                DrugRegistry::group(
                    "antifungals",
                    &["fluconazole", "posaconazole", "micafungin"],
                ),
                DrugRegistry::group("antivirals", &["acyclovir", "valacyclovir"]),
                DrugRegistry::group(
                    "immunosuppressants",
                    &["tacrolimus", "methotrexate", "mycophenolate", "cyclosporine"],
                ),
            ],
        };

        Self {
            schemas: vec![patients, taxonomy, bracken],
            drug_registry,
            missing_sentinels: ["", "na", "n/a", "none", "null", "nan", "-", "--", "unknown"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            missing_marker: String::new(),
            reference_date_column: "first_transplant_date".to_string(),
            window_days: 10,
            date_format: "%m/%d/%Y".to_string(),
        }
    }

    pub fn schema_for(&self, file_type: FileTypeLabel) -> Option<&CanonicalSchema> {
        self.schemas.iter().find(|s| s.file_type == file_type)
    }
}
