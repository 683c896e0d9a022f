//! String-similarity scoring for column-to-canonical matching.
//!
//! Uses the normalized Indel ratio, a [0, 1] sequence-matcher style score:
//! 1.0 is an exact match, 0.0 shares nothing.

use rapidfuzz::distance::indel;

/// Minimum similarity for a fuzzy rename to a canonical column.
pub const MATCH_THRESHOLD: f64 = 0.6;

/// Normalized similarity of two names in [0, 1].
pub fn similarity(left: &str, right: &str) -> f64 {
    indel::normalized_similarity(left.chars(), right.chars())
}

/// Best-scoring candidate for a name.
///
/// Ties keep the earliest candidate, so the result is deterministic for a
/// fixed candidate order.
pub fn best_match<'a, I>(name: &str, candidates: I) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = similarity(name, candidate);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_scores_one() {
        assert_eq!(similarity("patient_id", "patient_id"), 1.0);
    }

    #[test]
    fn close_variants_clear_the_threshold() {
        assert!(similarity("patientid", "patient_id") >= MATCH_THRESHOLD);
        assert!(similarity("start_dateeng", "start_date") >= MATCH_THRESHOLD);
        assert!(similarity("genderr", "gender") >= MATCH_THRESHOLD);
    }

    #[test]
    fn unrelated_names_stay_below_the_threshold() {
        assert!(similarity("ciprofloxin", "patient_id") < MATCH_THRESHOLD);
        assert!(similarity("fraction_total_reads", "age") < MATCH_THRESHOLD);
    }

    #[test]
    fn best_match_prefers_highest_then_earliest() {
        let candidates = ["start_date", "end_date"];
        let (name, score) = best_match("start_dat", candidates).unwrap();
        assert_eq!(name, "start_date");
        assert!(score > 0.9);

        // Equidistant candidates resolve to the first one.
        let (tie, _) = best_match("x", ["ab", "cd"]).unwrap();
        assert_eq!(tie, "ab");
    }

    #[test]
    fn best_match_on_empty_candidates_is_none() {
        assert!(best_match("anything", std::iter::empty::<&str>()).is_none());
    }
}
