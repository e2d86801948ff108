//! Collaborator trait definitions
//!
//! Both traits are object-safe so the pipeline can hold them behind `Arc`
//! and tests can inject mocks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Dimension, PersonaProfile};

/// Produces a natural-language answer to a questionnaire item, in character.
///
/// May be network-backed and slow; calls are treated as blocking from the
/// pipeline's point of view, and a failure propagates (the pipeline never
/// retries on its own beyond what the backend does internally).
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Backend name for logging (e.g., "openai", "mock").
    fn name(&self) -> &'static str;

    /// Answer one question as the given persona.
    async fn respond(&self, persona: &PersonaProfile, question: &str) -> Result<String>;
}

/// Rates a response text for one trait dimension.
///
/// Returns the raw rating text; parsing it into a 1-5 score (with the
/// fallback for unparseable text) is the pipeline's concern, not the
/// backend's.
#[async_trait]
pub trait TraitScorer: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Rate a response for the given dimension, returning raw text.
    async fn rate(&self, response: &str, dimension: Dimension) -> Result<String>;
}

/// Shared generator handle.
pub type SharedGenerator = Arc<dyn ResponseGenerator>;

/// Shared scorer handle.
pub type SharedScorer = Arc<dyn TraitScorer>;
