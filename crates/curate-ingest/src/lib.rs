//! Delimited-text ingestion and persistence for the curation engine.
//!
//! Reading sniffs the delimiter and squares ragged exports into a
//! [`curate_model::Table`]; persistence replaces files through a
//! backup-then-commit sequence that never leaves a half-written table at
//! the original path.

pub mod delimited;
pub mod error;
pub mod persist;

pub use delimited::{detect_delimiter, read_table, write_table};
pub use error::{IngestError, Result};
pub use persist::{commit_table, next_backup_path, rotate_backup};
