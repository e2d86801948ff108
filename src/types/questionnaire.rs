//! Questionnaire document types.

use serde::{Deserialize, Serialize};

use super::Dimension;

/// One BFI question. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier (e.g. "BFI-1").
    pub id: String,

    /// Display text shown to the persona agent.
    ///
    /// The upstream dataset stores rewritten English question text under
    /// this key, so we keep the document field name.
    #[serde(rename = "rewritten_en")]
    pub text: String,

    /// The trait dimension this question probes.
    pub dimension: Dimension,
}

/// Ordered sequence of questions.
///
/// Order is preserved through the interview but carries no semantic weight
/// for scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Questionnaire {
    pub questions: Vec<Question>,
}

impl Questionnaire {
    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the questionnaire has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_document_shape() {
        let json = r#"{
            "id": "BFI-1",
            "rewritten_en": "Do you see yourself as someone who is talkative?",
            "dimension": "Extraversion"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, "BFI-1");
        assert_eq!(q.dimension, Dimension::Extraversion);
        assert!(q.text.contains("talkative"));
    }

    #[test]
    fn test_questionnaire_order_preserved() {
        let json = r#"{"questions": [
            {"id": "Q2", "rewritten_en": "b", "dimension": "Openness"},
            {"id": "Q1", "rewritten_en": "a", "dimension": "Neuroticism"}
        ]}"#;
        let q: Questionnaire = serde_json::from_str(json).unwrap();
        assert_eq!(q.len(), 2);
        assert_eq!(q.questions[0].id, "Q2");
        assert_eq!(q.questions[1].id, "Q1");
    }
}
