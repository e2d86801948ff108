//! Pipeline output types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Dimension;

/// One answered question. Produced once per (persona, question) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub question_id: String,
    pub question: String,
    pub response: String,
}

/// An interview record with its rated trait score attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub question_id: String,
    pub question: String,
    pub response: String,
    pub dimension: Dimension,
    pub score: i64,
}

impl ScoredRecord {
    /// Attach a dimension and score to an interview record.
    pub fn from_record(record: InterviewRecord, dimension: Dimension, score: i64) -> Self {
        Self {
            question_id: record.question_id,
            question: record.question,
            response: record.response,
            dimension,
            score,
        }
    }
}

/// Mean score per dimension for one persona.
///
/// Ordered map so serialized output is stable across runs. Dimensions with
/// zero scored records are absent, never a mean of zero entries.
pub type AggregateScores = BTreeMap<Dimension, f64>;

/// Hit/miss per dimension present in the aggregate scores.
pub type HitResult = BTreeMap<Dimension, bool>;

/// Everything produced for one persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaResult {
    /// Scored records in question order.
    pub results: Vec<ScoredRecord>,

    /// Mean score per dimension.
    pub average_scores: AggregateScores,

    /// Whether each aggregated dimension landed within tolerance of its
    /// expected score.
    #[serde(rename = "hit@k")]
    pub hit_at_k: HitResult,
}

/// Batch output keyed by persona display name.
///
/// Names are assumed unique within a batch; a collision overwrites the
/// earlier entry (last-write-wins).
pub type BatchResult = BTreeMap<String, PersonaResult>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_record_from_record() {
        let record = InterviewRecord {
            question_id: "Q1".to_string(),
            question: "Are you talkative?".to_string(),
            response: "Not especially.".to_string(),
        };
        let scored = ScoredRecord::from_record(record, Dimension::Extraversion, 2);
        assert_eq!(scored.question_id, "Q1");
        assert_eq!(scored.dimension, Dimension::Extraversion);
        assert_eq!(scored.score, 2);
    }

    #[test]
    fn test_persona_result_serializes_hit_at_k_key() {
        let result = PersonaResult {
            results: vec![],
            average_scores: AggregateScores::new(),
            hit_at_k: HitResult::new(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"hit@k\""));
    }

    #[test]
    fn test_aggregate_scores_map_keys() {
        let mut scores = AggregateScores::new();
        scores.insert(Dimension::Openness, 3.5);
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, "{\"Openness\":3.5}");
    }
}
