//! Data model for the table curation engine.
//!
//! Everything here is plain, immutable-by-convention data: the text table
//! representation, the per-type canonical schemas, the drug registry and
//! the pipeline status log. Behaviour lives in the sibling crates.

pub mod error;
pub mod file_type;
pub mod schema;
pub mod status;
pub mod table;

pub use error::{CurationError, Result};
pub use file_type::FileTypeLabel;
pub use schema::{CanonicalSchema, CurationConfig, DrugGroup, DrugRegistry};
pub use status::StatusLog;
pub use table::{ColumnIndex, Table};
