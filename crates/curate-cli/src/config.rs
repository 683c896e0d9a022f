//! Schema override loading.
//!
//! The builtin configuration ships with the binary; a TOML document can
//! replace individual pieces per run: whole file-type schemas, the drug
//! registry, the sentinel set or the window parameters. Absent sections
//! keep their builtin values.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use curate_model::{CanonicalSchema, CurationConfig, DrugGroup, DrugRegistry, FileTypeLabel};

#[derive(Debug, Default, Deserialize)]
struct OverrideDoc {
    #[serde(default)]
    types: Vec<TypeDoc>,
    #[serde(default)]
    drug_groups: Vec<DrugGroupDoc>,
    #[serde(default)]
    missing_sentinels: Option<Vec<String>>,
    #[serde(default)]
    window_days: Option<i64>,
    #[serde(default)]
    reference_date_column: Option<String>,
    #[serde(default)]
    date_format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeDoc {
    name: FileTypeLabel,
    columns: Vec<String>,
    #[serde(default)]
    identifiers: Vec<String>,
    #[serde(default)]
    repeatable: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DrugGroupDoc {
    label: String,
    drugs: Vec<String>,
}

/// Load the curation configuration, applying overrides when a path is
/// given.
pub fn load_config(overrides: Option<&Path>) -> Result<CurationConfig> {
    let mut config = CurationConfig::builtin();
    let Some(path) = overrides else {
        return Ok(config);
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("read schema overrides: {}", path.display()))?;
    let doc: OverrideDoc = toml::from_str(&contents)
        .with_context(|| format!("parse schema overrides: {}", path.display()))?;

    for type_doc in doc.types {
        let schema = CanonicalSchema {
            file_type: type_doc.name,
            columns: type_doc.columns,
            identifiers: type_doc.identifiers,
            repeatable: type_doc.repeatable.into_iter().collect(),
        };
        match config
            .schemas
            .iter_mut()
            .find(|s| s.file_type == schema.file_type)
        {
            Some(existing) => *existing = schema,
            None => config.schemas.push(schema),
        }
    }

    if !doc.drug_groups.is_empty() {
        config.drug_registry = DrugRegistry {
            groups: doc
                .drug_groups
                .into_iter()
                .map(|g| DrugGroup {
                    label: g.label,
                    drugs: g.drugs,
                })
                .collect(),
        };
    }
    if let Some(sentinels) = doc.missing_sentinels {
        config.missing_sentinels = sentinels
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect::<BTreeSet<_>>();
    }
    if let Some(window_days) = doc.window_days {
        config.window_days = window_days;
    }
    if let Some(reference) = doc.reference_date_column {
        config.reference_date_column = reference;
    }
    if let Some(date_format) = doc.date_format {
        config.date_format = date_format;
    }
    Ok(config)
}
