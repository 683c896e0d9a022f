#![deny(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

/// Failure classes of the curation engine.
///
/// Read, classification and save failures never escape the pipeline as
/// `Err`: they are downgraded to status tokens plus an empty result. The
/// variants exist so the steps themselves can report failures precisely
/// before the pipeline flattens them.
#[derive(Debug, Error)]
pub enum CurationError {
    /// Input could not be read or interpreted at all.
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// Table matched no known schema.
    #[error("table matched no known file type")]
    UnknownFileType,

    /// Table could not be interpreted structurally.
    #[error("table could not be interpreted")]
    Unreadable,

    /// The reconciler's reference date column is absent. Recoverable: the
    /// pipeline records it and leaves the table untouched for that step.
    #[error("reference date column '{column}' not found")]
    MissingReferenceColumn { column: String },

    /// Backup rotation or output write failed.
    #[error("failed to save {path}: {message}")]
    Save { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, CurationError>;
