//! Score aggregation
//!
//! Reduces a persona's scored records to a mean score per dimension.

use std::collections::BTreeMap;

use crate::types::{AggregateScores, ScoredRecord};

/// Compute the arithmetic mean score per dimension.
///
/// Grouping is by the `dimension` field only; insertion order within a
/// group is irrelevant. Means are full-precision f64, no rounding.
/// Dimensions with zero records are absent from the output.
pub fn aggregate(records: &[ScoredRecord]) -> AggregateScores {
    let mut sums: BTreeMap<_, (i64, usize)> = BTreeMap::new();

    for record in records {
        let entry = sums.entry(record.dimension).or_insert((0, 0));
        entry.0 += record.score;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(dimension, (sum, count))| (dimension, sum as f64 / count as f64))
        .collect()
}
