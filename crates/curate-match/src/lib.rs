//! Column-name normalization and canonicalization.
//!
//! Turns whatever header a human export carries into the canonical,
//! type-specific vocabulary: structural normalization first, then exact or
//! fuzzy matching against the schema, then deterministic collision
//! resolution. All passes are pure functions of their inputs.

pub mod canonical;
pub mod normalize;
pub mod score;

pub use canonical::canonicalize_columns;
pub use normalize::{disambiguate, normalize_column, normalize_headers};
pub use score::{MATCH_THRESHOLD, best_match, similarity};
