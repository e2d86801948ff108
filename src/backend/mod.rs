//! Collaborator backends for the assessment pipeline
//!
//! The pipeline never talks to an LLM directly; it goes through the
//! `ResponseGenerator` and `TraitScorer` traits so tests can substitute
//! deterministic fakes.

mod mock;
mod openai;
mod traits;

pub use mock::{MockConfig, MockGenerator, MockScorer};
pub use openai::{OpenAiBackend, OpenAiConfig};
pub use traits::{ResponseGenerator, SharedGenerator, SharedScorer, TraitScorer};

use std::sync::Arc;

use crate::config::BackendSettings;
use crate::error::{Error, Result};

/// Build a generator from its config section.
pub fn build_generator(settings: &BackendSettings) -> Result<SharedGenerator> {
    match settings.backend.as_str() {
        "openai" => Ok(Arc::new(OpenAiBackend::new(OpenAiConfig::from(settings)))),
        "mock" => Ok(Arc::new(MockGenerator::new())),
        other => Err(Error::config_field_invalid(
            "generator.backend",
            format!("unknown backend '{}'", other),
        )),
    }
}

/// Build a scorer from its config section.
pub fn build_scorer(settings: &BackendSettings) -> Result<SharedScorer> {
    match settings.backend.as_str() {
        "openai" => Ok(Arc::new(OpenAiBackend::new(OpenAiConfig::from(settings)))),
        "mock" => Ok(Arc::new(MockScorer::new())),
        other => Err(Error::config_field_invalid(
            "scorer.backend",
            format!("unknown backend '{}'", other),
        )),
    }
}
