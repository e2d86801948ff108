//! The assessment-and-scoring pipeline
//!
//! Per persona the pipeline is strictly linear: collect responses, score
//! each record, aggregate per dimension, evaluate hit@k. The batch runner
//! repeats it over a (possibly sampled) persona set.

mod aggregate;
mod collector;
mod evaluate;
mod runner;
mod scorer;

pub use aggregate::aggregate;
pub use collector::collect;
pub use evaluate::hit_at_k;
pub use runner::{BatchRunner, RunnerConfig};
pub use scorer::{parse_score, score_record, FALLBACK_SCORE};
