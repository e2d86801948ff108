//! Mock collaborators for testing and offline runs
//!
//! Deterministic implementations of `ResponseGenerator` and `TraitScorer`
//! with scripted outputs, failure injection, and call counting.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::error::{Error, Result};
use crate::types::{Dimension, PersonaProfile};

use super::{ResponseGenerator, TraitScorer};

// ─────────────────────────────────────────────────────────────────
// Mock Configuration
// ─────────────────────────────────────────────────────────────────

/// Configuration shared by the mock generator and scorer
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Fail every generator call
    pub fail_respond: bool,

    /// Fail every scorer call
    pub fail_rate: bool,

    /// Fixed response text for the generator (None = derived from input)
    pub fixed_response: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// Mock Generator
// ─────────────────────────────────────────────────────────────────

/// Mock response generator
///
/// By default echoes the question back as the persona would, matching the
/// simulated agent used during development.
pub struct MockGenerator {
    config: MockConfig,
    calls: RwLock<u32>,
}

impl MockGenerator {
    /// Create a mock generator with default behavior
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    /// Create a mock generator with custom behavior
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            calls: RwLock::new(0),
        }
    }

    /// Number of respond() calls so far
    pub fn call_count(&self) -> u32 {
        *self.calls.read()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseGenerator for MockGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn respond(&self, persona: &PersonaProfile, question: &str) -> Result<String> {
        *self.calls.write() += 1;

        if self.config.fail_respond {
            return Err(Error::GeneratorRequest {
                message: "mock generator failure".to_string(),
            });
        }

        if let Some(ref fixed) = self.config.fixed_response {
            return Ok(fixed.clone());
        }

        Ok(format!("Response as {}: {} (simulated)", persona.name, question))
    }
}

// ─────────────────────────────────────────────────────────────────
// Mock Scorer
// ─────────────────────────────────────────────────────────────────

/// Mock trait scorer
///
/// Returns scripted raw texts in order (when provided), otherwise a
/// neutral "3" for every call.
pub struct MockScorer {
    config: MockConfig,
    scripted: Mutex<VecDeque<String>>,
    calls: RwLock<u32>,
}

impl MockScorer {
    /// Create a mock scorer that always rates "3"
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    /// Create a mock scorer with custom behavior
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            scripted: Mutex::new(VecDeque::new()),
            calls: RwLock::new(0),
        }
    }

    /// Create a mock scorer that returns the given raw texts in order,
    /// then falls back to "3"
    pub fn with_scores<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scorer = Self::new();
        *scorer.scripted.lock() = scores.into_iter().map(Into::into).collect();
        scorer
    }

    /// Number of rate() calls so far
    pub fn call_count(&self) -> u32 {
        *self.calls.read()
    }
}

impl Default for MockScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TraitScorer for MockScorer {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn rate(&self, _response: &str, _dimension: Dimension) -> Result<String> {
        *self.calls.write() += 1;

        if self.config.fail_rate {
            return Err(Error::ScorerRequest {
                message: "mock scorer failure".to_string(),
            });
        }

        Ok(self
            .scripted
            .lock()
            .pop_front()
            .unwrap_or_else(|| "3".to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(name: &str) -> PersonaProfile {
        serde_json::from_str(&format!(r#"{{"name": "{}"}}"#, name)).unwrap()
    }

    #[tokio::test]
    async fn test_mock_generator_echoes_persona() {
        let generator = MockGenerator::new();
        let response = generator
            .respond(&persona("Cleopatra"), "Are you talkative?")
            .await
            .unwrap();
        assert!(response.contains("Cleopatra"));
        assert!(response.contains("Are you talkative?"));
    }

    #[tokio::test]
    async fn test_mock_generator_fixed_response() {
        let generator = MockGenerator::with_config(MockConfig {
            fixed_response: Some("Always this.".to_string()),
            ..Default::default()
        });
        let response = generator.respond(&persona("X"), "Q?").await.unwrap();
        assert_eq!(response, "Always this.");
    }

    #[tokio::test]
    async fn test_mock_generator_failure() {
        let generator = MockGenerator::with_config(MockConfig {
            fail_respond: true,
            ..Default::default()
        });
        assert!(generator.respond(&persona("X"), "Q?").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_generator_call_counting() {
        let generator = MockGenerator::new();
        let p = persona("X");
        let _ = generator.respond(&p, "a").await;
        let _ = generator.respond(&p, "b").await;
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_scorer_default_neutral() {
        let scorer = MockScorer::new();
        let raw = scorer.rate("whatever", Dimension::Openness).await.unwrap();
        assert_eq!(raw, "3");
    }

    #[tokio::test]
    async fn test_mock_scorer_scripted_then_neutral() {
        let scorer = MockScorer::with_scores(["5", "2"]);
        assert_eq!(scorer.rate("a", Dimension::Openness).await.unwrap(), "5");
        assert_eq!(scorer.rate("b", Dimension::Openness).await.unwrap(), "2");
        assert_eq!(scorer.rate("c", Dimension::Openness).await.unwrap(), "3");
        assert_eq!(scorer.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_scorer_failure() {
        let scorer = MockScorer::with_config(MockConfig {
            fail_rate: true,
            ..Default::default()
        });
        assert!(scorer.rate("a", Dimension::Openness).await.is_err());
    }
}
