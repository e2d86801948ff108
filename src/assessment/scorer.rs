//! Dimension scoring
//!
//! Delegates the numeric rating to the scorer collaborator and parses its
//! raw text into an integer score.

use tracing::{debug, warn};

use crate::backend::TraitScorer;
use crate::error::{Error, Result};
use crate::types::{Dimension, InterviewRecord, ScoredRecord};

/// Canonical fallback score for unparseable rating text: the midpoint of
/// the 1-5 scale. A defined recovery path, never an error.
pub const FALLBACK_SCORE: i64 = 3;

/// Parse a raw rating text into an integer score.
///
/// Takes the last whitespace-separated token and parses it as an integer;
/// anything else yields [`FALLBACK_SCORE`]. Deterministic and infallible.
pub fn parse_score(text: &str) -> i64 {
    text.split_whitespace()
        .last()
        .and_then(|token| token.parse::<i64>().ok())
        .unwrap_or(FALLBACK_SCORE)
}

/// Rate one interview record for the given dimension.
///
/// A collaborator failure propagates with dimension context; out-of-range
/// scores are passed through unclamped but logged.
pub async fn score_record(
    scorer: &dyn TraitScorer,
    record: InterviewRecord,
    dimension: Dimension,
) -> Result<ScoredRecord> {
    let raw = scorer
        .rate(&record.response, dimension)
        .await
        .map_err(|e| match e {
            timeout @ Error::ScorerTimeout { .. } => timeout,
            other => Error::scorer_failed(dimension, other.to_string()),
        })?;

    let score = parse_score(&raw);

    if !(1..=5).contains(&score) {
        warn!(
            question_id = %record.question_id,
            dimension = %dimension,
            score,
            raw = %raw,
            "Score outside the 1-5 scale, passing through"
        );
    }

    debug!(
        question_id = %record.question_id,
        dimension = %dimension,
        score,
        "Record scored"
    );

    Ok(ScoredRecord::from_record(record, dimension, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockConfig, MockScorer};

    fn record(id: &str) -> InterviewRecord {
        InterviewRecord {
            question_id: id.to_string(),
            question: "Q?".to_string(),
            response: "A.".to_string(),
        }
    }

    #[test]
    fn test_parse_score_plain_integer() {
        assert_eq!(parse_score("4"), 4);
        assert_eq!(parse_score("  5  "), 5);
    }

    #[test]
    fn test_parse_score_last_token() {
        assert_eq!(parse_score("I would rate this a 2"), 2);
        assert_eq!(parse_score("Score: 5"), 5);
    }

    #[test]
    fn test_parse_score_fallback_on_nonnumeric() {
        assert_eq!(parse_score("excellent"), FALLBACK_SCORE);
        assert_eq!(parse_score(""), FALLBACK_SCORE);
        // Trailing punctuation defeats the integer parse; that is the
        // documented behavior, not a bug to quietly smooth over.
        assert_eq!(parse_score("5."), FALLBACK_SCORE);
    }

    #[test]
    fn test_parse_score_out_of_range_passes_through() {
        assert_eq!(parse_score("7"), 7);
        assert_eq!(parse_score("-1"), -1);
    }

    #[tokio::test]
    async fn test_score_record_attaches_dimension_and_score() {
        let scorer = MockScorer::with_scores(["4"]);
        let scored = score_record(&scorer, record("Q1"), Dimension::Agreeableness)
            .await
            .unwrap();
        assert_eq!(scored.question_id, "Q1");
        assert_eq!(scored.dimension, Dimension::Agreeableness);
        assert_eq!(scored.score, 4);
    }

    #[tokio::test]
    async fn test_score_record_fallback() {
        let scorer = MockScorer::with_scores(["sounds great"]);
        let scored = score_record(&scorer, record("Q1"), Dimension::Openness)
            .await
            .unwrap();
        assert_eq!(scored.score, FALLBACK_SCORE);
    }

    #[tokio::test]
    async fn test_score_record_collaborator_failure_propagates() {
        let scorer = MockScorer::with_config(MockConfig {
            fail_rate: true,
            ..Default::default()
        });
        let err = score_record(&scorer, record("Q1"), Dimension::Neuroticism)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Neuroticism"));
    }
}
