//! Threshold evaluation (hit@k)
//!
//! Compares aggregated scores against the persona's expected values within
//! an integer tolerance.

use std::collections::HashMap;

use crate::types::{AggregateScores, Dimension, HitResult};

/// Evaluate hit@k for every dimension present in `average_scores`.
///
/// A dimension hits iff `|expected - actual| <= k`. A dimension with no
/// expected score is compared against 0.0 — the reference behavior, kept
/// as-is even though it conflates "no claim" with "claim 0" (see
/// DESIGN.md). Dimensions never scored are absent from the output.
pub fn hit_at_k(
    average_scores: &AggregateScores,
    expected_scores: &HashMap<Dimension, f64>,
    k: u32,
) -> HitResult {
    average_scores
        .iter()
        .map(|(&dimension, &actual)| {
            let expected = expected_scores.get(&dimension).copied().unwrap_or(0.0);
            (dimension, (expected - actual).abs() <= f64::from(k))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn averages(entries: &[(Dimension, f64)]) -> AggregateScores {
        entries.iter().copied().collect()
    }

    fn expected(entries: &[(Dimension, f64)]) -> HashMap<Dimension, f64> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_hit_within_tolerance() {
        let hits = hit_at_k(
            &averages(&[(Dimension::Openness, 4.0)]),
            &expected(&[(Dimension::Openness, 3.0)]),
            1,
        );
        assert!(hits[&Dimension::Openness]);
    }

    #[test]
    fn test_miss_with_zero_tolerance() {
        let hits = hit_at_k(
            &averages(&[(Dimension::Openness, 4.0)]),
            &expected(&[(Dimension::Openness, 3.0)]),
            0,
        );
        assert!(!hits[&Dimension::Openness]);
    }

    #[test]
    fn test_miss_beyond_tolerance() {
        let hits = hit_at_k(
            &averages(&[(Dimension::Openness, 5.0)]),
            &expected(&[(Dimension::Openness, 3.0)]),
            1,
        );
        assert!(!hits[&Dimension::Openness]);
    }

    #[test]
    fn test_exact_boundary_is_a_hit() {
        let hits = hit_at_k(
            &averages(&[(Dimension::Extraversion, 2.0)]),
            &expected(&[(Dimension::Extraversion, 3.0)]),
            1,
        );
        assert!(hits[&Dimension::Extraversion]);
    }

    #[test]
    fn test_missing_threshold_defaults_to_zero() {
        // Documented reference behavior: |0 - 2| = 2 > 1 => miss
        let hits = hit_at_k(
            &averages(&[(Dimension::Conscientiousness, 2.0)]),
            &expected(&[]),
            1,
        );
        assert!(!hits[&Dimension::Conscientiousness]);
    }

    #[test]
    fn test_unscored_dimensions_absent_from_output() {
        let hits = hit_at_k(
            &averages(&[(Dimension::Openness, 3.0)]),
            &expected(&[
                (Dimension::Openness, 3.0),
                (Dimension::Neuroticism, 5.0),
            ]),
            1,
        );
        assert_eq!(hits.len(), 1);
        assert!(!hits.contains_key(&Dimension::Neuroticism));
    }
}
