use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;
use tracing::info;

use curate_engine::{PipelineRun, check_file, run_on_file};
use curate_model::CurationConfig;

use crate::summary::apply_table_style;
use crate::types::{CurateReport, FileOutcome};

/// Curate every file in place.
pub fn run_files(files: &[PathBuf], config: &CurationConfig) -> Result<CurateReport> {
    let outcomes = files
        .iter()
        .map(|path| outcome_for(path.clone(), run_on_file(path, config)))
        .collect();
    Ok(CurateReport { outcomes })
}

/// Dry-run every file: full in-memory pipeline, nothing written.
pub fn check_files(files: &[PathBuf], config: &CurationConfig) -> Result<CurateReport> {
    let outcomes = files
        .iter()
        .map(|path| outcome_for(path.clone(), check_file(path, config)))
        .collect();
    Ok(CurateReport { outcomes })
}

fn outcome_for(path: PathBuf, run: PipelineRun) -> FileOutcome {
    let status = run.log.join();
    info!(path = %path.display(), success = run.success, status = %status, "processed file");
    FileOutcome {
        path,
        file_type: run.file_type,
        rows_in: run.rows_in,
        rows_removed: run.rows_removed,
        status,
        backup: run.backup,
        success: run.success,
    }
}

/// Print the configured file types with their schemas.
pub fn run_types(config: &CurationConfig) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Type", "Canonical columns", "Identifiers", "Repeatable"]);
    apply_table_style(&mut table);
    for schema in &config.schemas {
        table.add_row(vec![
            schema.file_type.to_string(),
            schema.columns.join(", "),
            schema.identifiers.join(", "),
            schema
                .repeatable
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}
