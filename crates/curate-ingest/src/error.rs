//! Error types for table ingestion and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, writing or replacing table files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to read file contents (missing, unreadable, not UTF-8).
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse delimited content.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Failed to write a table file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to rotate the original file to its backup name.
    #[error("failed to back up {path} to {backup}: {source}")]
    BackupRotation {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to move the processed table into place.
    #[error("failed to replace {path}: {source}")]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Target path has no usable file name.
    #[error("path has no file name: {path}")]
    InvalidPath { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
