//! Batch orchestration
//!
//! Runs the full per-persona pipeline over a (possibly sampled) persona
//! set, sequentially, and assembles the combined result keyed by persona
//! display name.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::assessment::{aggregate, collect, hit_at_k, score_record};
use crate::backend::{SharedGenerator, SharedScorer};
use crate::error::{Error, Result};
use crate::types::{BatchResult, Persona, PersonaResult, Questionnaire};

/// Batch runner knobs, passed in explicitly rather than read from ambient
/// state so runs are reproducible.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// hit@k tolerance
    pub tolerance_k: u32,

    /// Assess only a random sample of this many personas (None = all)
    pub sample_size: Option<usize>,

    /// Seed for deterministic sampling
    pub seed: u64,

    /// On a collaborator failure, skip that persona and continue the batch.
    /// Off by default: failures abort the whole run.
    pub skip_failed: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tolerance_k: 1,
            sample_size: None,
            seed: 42,
            skip_failed: false,
        }
    }
}

/// Orchestrates Collect → Score → Aggregate → Evaluate per persona.
pub struct BatchRunner {
    generator: SharedGenerator,
    scorer: SharedScorer,
    config: RunnerConfig,
}

impl BatchRunner {
    /// Create a runner with the given collaborators and configuration.
    pub fn new(generator: SharedGenerator, scorer: SharedScorer, config: RunnerConfig) -> Self {
        Self {
            generator,
            scorer,
            config,
        }
    }

    /// Run the batch. Persona processing order is the sample order; name
    /// collisions in the result map are last-write-wins.
    pub async fn run(
        &self,
        personas: &[Persona],
        questionnaire: &Questionnaire,
    ) -> Result<BatchResult> {
        let indices = sample_indices(personas.len(), self.config.sample_size, self.config.seed)?;

        info!(
            total = personas.len(),
            selected = indices.len(),
            seed = self.config.seed,
            tolerance_k = self.config.tolerance_k,
            "Starting batch assessment"
        );

        let mut results = BatchResult::new();

        for (position, &index) in indices.iter().enumerate() {
            let persona = &personas[index];
            info!(
                persona = %persona.name(),
                progress = format!("{}/{}", position + 1, indices.len()),
                "Assessing persona"
            );

            match self.run_persona(persona, questionnaire).await {
                Ok(result) => {
                    if results.insert(persona.name().to_string(), result).is_some() {
                        warn!(
                            persona = %persona.name(),
                            "Duplicate persona name, earlier result overwritten"
                        );
                    }
                }
                Err(e) if self.config.skip_failed && !e.is_fatal() => {
                    warn!(
                        persona = %persona.name(),
                        error = %e.format_for_log(),
                        "Persona skipped after collaborator failure"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(results)
    }

    /// The strictly linear per-persona pipeline.
    async fn run_persona(
        &self,
        persona: &Persona,
        questionnaire: &Questionnaire,
    ) -> Result<PersonaResult> {
        let records = collect(self.generator.as_ref(), &persona.profile, questionnaire).await?;

        let mut scored = Vec::with_capacity(records.len());
        for (record, question) in records.into_iter().zip(&questionnaire.questions) {
            scored.push(score_record(self.scorer.as_ref(), record, question.dimension).await?);
        }

        let average_scores = aggregate(&scored);
        let hits = hit_at_k(
            &average_scores,
            &persona.profile.expected_scores,
            self.config.tolerance_k,
        );

        Ok(PersonaResult {
            results: scored,
            average_scores,
            hit_at_k: hits,
        })
    }
}

/// Select the persona indices to assess.
///
/// Pure function of (count, sample_size, seed): the same inputs always
/// produce the same subset in the same order. With no sample size the full
/// set is processed in input order; a sample is drawn uniformly without
/// replacement from a seeded RNG.
pub fn sample_indices(count: usize, sample_size: Option<usize>, seed: u64) -> Result<Vec<usize>> {
    match sample_size {
        None => Ok((0..count).collect()),
        Some(n) if n > count => Err(Error::SampleTooLarge {
            requested: n,
            available: count,
        }),
        Some(n) => {
            let mut rng = StdRng::seed_from_u64(seed);
            Ok(rand::seq::index::sample(&mut rng, count, n).into_vec())
        }
    }
}
