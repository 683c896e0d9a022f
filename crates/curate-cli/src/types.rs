use std::path::PathBuf;

use curate_model::FileTypeLabel;

/// Aggregated result of one `run` or `check` invocation.
#[derive(Debug)]
pub struct CurateReport {
    pub outcomes: Vec<FileOutcome>,
}

impl CurateReport {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| !o.success)
    }
}

/// Per-file outcome for the summary table.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub file_type: Option<FileTypeLabel>,
    pub rows_in: usize,
    pub rows_removed: usize,
    pub status: String,
    pub backup: Option<PathBuf>,
    pub success: bool,
}
