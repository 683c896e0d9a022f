//! Backup-then-commit file replacement.
//!
//! The processed table never overwrites the original in place. Commit
//! order: write the new content to a temp file next to the target, rotate
//! the original to a fresh `_orig` backup name, then rename the temp file
//! onto the target. A failure after rotation leaves the backup on disk;
//! there is no automatic restore. Concurrent commits against the same path
//! must be serialized by the caller.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use curate_model::Table;

use crate::delimited::write_table;
use crate::error::{IngestError, Result};

/// Suffix inserted before the extension of rotated originals.
const BACKUP_SUFFIX: &str = "_orig";

/// First free backup path for `path`: `<name>_orig<ext>`, then
/// `<name>_orig_1<ext>`, `_orig_2`, …. Existing backups are never
/// overwritten.
pub fn next_backup_path(path: &Path) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestError::InvalidPath {
            path: path.to_path_buf(),
        })?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    let mut candidate = path.with_file_name(format!("{stem}{BACKUP_SUFFIX}{extension}"));
    let mut counter = 0usize;
    while candidate.exists() {
        counter += 1;
        candidate = path.with_file_name(format!("{stem}{BACKUP_SUFFIX}_{counter}{extension}"));
    }
    Ok(candidate)
}

/// Rotate `path` to its next free backup name and return the backup path.
pub fn rotate_backup(path: &Path) -> Result<PathBuf> {
    let backup = next_backup_path(path)?;
    fs::rename(path, &backup).map_err(|source| IngestError::BackupRotation {
        path: path.to_path_buf(),
        backup: backup.clone(),
        source,
    })?;
    debug!(path = %path.display(), backup = %backup.display(), "rotated backup");
    Ok(backup)
}

/// Replace `path` with `table`, keeping the original as a backup.
///
/// Returns the backup path on success. On failure the target still holds
/// either the original file (temp write or rotation failed) or nothing at
/// the original name with the backup intact (final rename failed).
pub fn commit_table(path: &Path, table: &Table, delimiter: u8) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| IngestError::InvalidPath {
            path: path.to_path_buf(),
        })?;
    let temp = path.with_file_name(format!("{file_name}.tmp"));

    write_table(&temp, table, delimiter)?;

    let backup = match rotate_backup(path) {
        Ok(backup) => backup,
        Err(error) => {
            let _ = fs::remove_file(&temp);
            return Err(error);
        }
    };

    if let Err(source) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(IngestError::Replace {
            path: path.to_path_buf(),
            source,
        });
    }

    info!(path = %path.display(), backup = %backup.display(), "committed curated table");
    Ok(backup)
}
