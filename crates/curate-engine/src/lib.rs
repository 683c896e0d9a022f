//! The curation engine.
//!
//! Takes a raw, human-exported table (or a path to one) through the fixed
//! curation sequence: classification, column canonicalization, structural
//! validation, temporal medication reconciliation and persistence. Every
//! invocation is independent and stateless; configuration is injected per
//! call.

pub mod classify;
pub mod pipeline;
pub mod reconcile;
pub mod validate;

pub use classify::classify;
pub use pipeline::{
    PipelineRun, StepPolicy, check_file, curate_file, curate_table, run_on_file, run_on_table,
    step_policy,
};
pub use reconcile::{locate_paired_dates, reconcile_medications};
pub use validate::{ValueRules, remove_invalid_rows, scrub_values};
