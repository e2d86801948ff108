//! Response collection
//!
//! Asks every questionnaire item via the generator collaborator and records
//! the raw responses, one record per question, in questionnaire order.

use tracing::debug;

use crate::backend::ResponseGenerator;
use crate::error::{Error, Result};
use crate::types::{InterviewRecord, PersonaProfile, Questionnaire};

/// Interview one persona with the full questionnaire.
///
/// Invokes the generator exactly once per question. Fail-fast: a generator
/// error aborts the interview and propagates with persona/question context;
/// no partial results are salvaged here.
pub async fn collect(
    generator: &dyn ResponseGenerator,
    persona: &PersonaProfile,
    questionnaire: &Questionnaire,
) -> Result<Vec<InterviewRecord>> {
    let mut records = Vec::with_capacity(questionnaire.len());

    for question in &questionnaire.questions {
        let response = generator
            .respond(persona, &question.text)
            .await
            .map_err(|e| match e {
                // Timeouts already carry persona context
                timeout @ Error::GeneratorTimeout { .. } => timeout,
                other => Error::generator_failed(&persona.name, &question.id, other.to_string()),
            })?;

        debug!(
            persona = %persona.name,
            question_id = %question.id,
            response_len = response.len(),
            "Response collected"
        );

        records.push(InterviewRecord {
            question_id: question.id.clone(),
            question: question.text.clone(),
            response,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockConfig, MockGenerator};
    use crate::types::Dimension;

    fn persona(name: &str) -> PersonaProfile {
        serde_json::from_str(&format!(r#"{{"name": "{}"}}"#, name)).unwrap()
    }

    fn questionnaire(n: usize) -> Questionnaire {
        let questions = (0..n)
            .map(|i| crate::types::Question {
                id: format!("Q{}", i + 1),
                text: format!("Question {}?", i + 1),
                dimension: Dimension::Openness,
            })
            .collect();
        Questionnaire { questions }
    }

    #[tokio::test]
    async fn test_one_record_per_question_in_order() {
        let generator = MockGenerator::new();
        let records = collect(&generator, &persona("P"), &questionnaire(5))
            .await
            .unwrap();

        assert_eq!(records.len(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.question_id, format!("Q{}", i + 1));
        }
        assert_eq!(generator.call_count(), 5);
    }

    #[tokio::test]
    async fn test_empty_questionnaire_yields_no_records() {
        let generator = MockGenerator::new();
        let records = collect(&generator, &persona("P"), &questionnaire(0))
            .await
            .unwrap();
        assert!(records.is_empty());
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generator_failure_propagates_with_context() {
        let generator = MockGenerator::with_config(MockConfig {
            fail_respond: true,
            ..Default::default()
        });
        let err = collect(&generator, &persona("Socrates"), &questionnaire(3))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Socrates"));
        assert!(message.contains("Q1"));
        // Fail-fast: no further questions were asked
        assert_eq!(generator.call_count(), 1);
    }
}
