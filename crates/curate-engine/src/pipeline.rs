//! Pipeline orchestration.
//!
//! Fixed step order: load, classify, canonicalize, remove invalid rows,
//! reconcile medications, scrub values, persist. Each step appends exactly
//! one status token; the joined log is the sole diagnostic channel for
//! expected failure classes, so the pipeline never returns `Err` for them.

use std::path::{Path, PathBuf};

use tracing::{info, info_span};

use curate_ingest::{commit_table, read_table};
use curate_match::canonicalize_columns;
use curate_model::{CurationConfig, FileTypeLabel, StatusLog, Table};

use crate::classify::classify;
use crate::reconcile::reconcile_medications;
use crate::validate::{ValueRules, remove_invalid_rows, scrub_values};

/// Failure handling for a pipeline step.
///
/// Every step is fatal-on-failure except medication reconciliation, which
/// degrades to a status token with the table left unmodified for that step
/// only. The policy is data, not scattered control flow, so changing a
/// step's class is a one-line edit here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    Fatal,
    Recoverable,
}

const STEP_POLICIES: &[(&str, StepPolicy)] = &[
    ("load", StepPolicy::Fatal),
    ("classify", StepPolicy::Fatal),
    ("canonicalize", StepPolicy::Fatal),
    ("remove_rows", StepPolicy::Fatal),
    ("reconcile", StepPolicy::Recoverable),
    ("scrub", StepPolicy::Fatal),
    ("save", StepPolicy::Fatal),
];

pub fn step_policy(step: &str) -> StepPolicy {
    STEP_POLICIES
        .iter()
        .find(|(name, _)| *name == step)
        .map_or(StepPolicy::Fatal, |(_, policy)| *policy)
}

/// Outcome of one pipeline invocation.
#[derive(Debug)]
pub struct PipelineRun {
    /// The curated table for in-memory input; `None` for path input (the
    /// result is persisted instead) and whenever a fatal step failed.
    pub table: Option<Table>,
    pub log: StatusLog,
    pub file_type: Option<FileTypeLabel>,
    pub rows_in: usize,
    pub rows_removed: usize,
    /// Backup path created by persistence, when a file was committed.
    pub backup: Option<PathBuf>,
    pub success: bool,
}

impl PipelineRun {
    fn failed(log: StatusLog) -> Self {
        Self {
            table: None,
            log,
            file_type: None,
            rows_in: 0,
            rows_removed: 0,
            backup: None,
            success: false,
        }
    }
}

/// Curate an in-memory table.
///
/// The caller contract: a table when every fatal step succeeded, `None`
/// when classification failed, plus the semicolon-joined status string.
pub fn curate_table(table: Table, config: &CurationConfig) -> (Option<Table>, StatusLog) {
    let run = run_on_table(table, config);
    (run.table, run.log)
}

/// Curate a file in place, with backup-then-commit persistence.
///
/// Always returns `None` for the table: on success the result lives at the
/// input path and the original at the rotated backup path.
pub fn curate_file(path: &Path, config: &CurationConfig) -> (Option<Table>, StatusLog) {
    let run = run_on_file(path, config);
    (None, run.log)
}

/// Full pipeline over an in-memory table, with run details.
pub fn run_on_table(table: Table, config: &CurationConfig) -> PipelineRun {
    let mut log = StatusLog::new();
    let rows_in = table.row_count();
    finish_in_memory(run_steps(table, config, &mut log), log, rows_in)
}

/// Full pipeline over a file, persisting the result in place.
pub fn run_on_file(path: &Path, config: &CurationConfig) -> PipelineRun {
    let span = info_span!("curate", path = %path.display());
    let _guard = span.enter();

    let mut log = StatusLog::new();
    let (table, delimiter) = match read_table(path) {
        Ok(loaded) => loaded,
        Err(error) => {
            log.push(format!("read failed: {error}"));
            return PipelineRun::failed(log);
        }
    };
    log.push("loaded");
    let rows_in = table.row_count();

    let Some((curated, file_type, rows_removed)) = run_steps(table, config, &mut log) else {
        let mut run = PipelineRun::failed(log);
        run.rows_in = rows_in;
        return run;
    };

    match commit_table(path, &curated, delimiter) {
        Ok(backup) => {
            log.push("saved");
            info!(file_type = %file_type, rows = curated.row_count(), "curated file");
            PipelineRun {
                table: None,
                log,
                file_type: Some(file_type),
                rows_in,
                rows_removed,
                backup: Some(backup),
                success: true,
            }
        }
        Err(error) => {
            log.push(format!("save failed: {error}"));
            let mut run = PipelineRun::failed(log);
            run.file_type = Some(file_type);
            run.rows_in = rows_in;
            run.rows_removed = rows_removed;
            run
        }
    }
}

/// Load a file and run every in-memory step without persisting anything.
pub fn check_file(path: &Path, config: &CurationConfig) -> PipelineRun {
    let mut log = StatusLog::new();
    let (table, _) = match read_table(path) {
        Ok(loaded) => loaded,
        Err(error) => {
            log.push(format!("read failed: {error}"));
            return PipelineRun::failed(log);
        }
    };
    log.push("loaded");
    let rows_in = table.row_count();
    finish_in_memory(run_steps(table, config, &mut log), log, rows_in)
}

fn finish_in_memory(
    outcome: Option<(Table, FileTypeLabel, usize)>,
    log: StatusLog,
    rows_in: usize,
) -> PipelineRun {
    match outcome {
        Some((table, file_type, rows_removed)) => PipelineRun {
            table: Some(table),
            log,
            file_type: Some(file_type),
            rows_in,
            rows_removed,
            backup: None,
            success: true,
        },
        None => {
            let mut run = PipelineRun::failed(log);
            run.rows_in = rows_in;
            run
        }
    }
}

/// The shared in-memory step sequence. Returns the curated table, its
/// type, and the removed-row count, or `None` when a fatal step failed.
fn run_steps(
    mut table: Table,
    config: &CurationConfig,
    log: &mut StatusLog,
) -> Option<(Table, FileTypeLabel, usize)> {
    let label = classify(&table, config);
    match label {
        FileTypeLabel::Error => {
            log.push("classification error");
            return None;
        }
        FileTypeLabel::Unknown => {
            log.push("classification unknown");
            return None;
        }
        named => log.push(format!("classified as {named}")),
    }
    let Some(schema) = config.schema_for(label) else {
        // A heuristic label without a schema cannot be curated further.
        log.push("classification unknown");
        return None;
    };

    table.columns = canonicalize_columns(&table.columns, schema);
    log.push("canonicalized columns");

    let rows_removed = match remove_invalid_rows(&mut table, schema) {
        Some(removed) => {
            log.push(format!("removed {removed} invalid rows"));
            removed
        }
        None => {
            log.push("row validation skipped (no identifier columns)");
            0
        }
    };

    if label == FileTypeLabel::Patients {
        match reconcile_medications(&table, config) {
            Ok(reconciled) => {
                table = reconciled;
                log.push("reconciled medications");
            }
            Err(error) => {
                // Recoverable per the step policy: record and move on with
                // the table untouched by this step.
                debug_assert_eq!(step_policy("reconcile"), StepPolicy::Recoverable);
                log.push(format!("medication reconciliation failed: {error}"));
            }
        }
    } else {
        log.push("medication reconciliation skipped");
    }

    let scrubbed = scrub_values(&mut table, ValueRules::from_config(config));
    log.push(format!("scrubbed {scrubbed} values"));

    Some((table, label, rows_removed))
}
