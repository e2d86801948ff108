//! Core data types for the assessment pipeline
//!
//! Everything here is created during a single pipeline pass and is
//! write-once; there are no update or deletion semantics.

mod dimension;
mod persona;
mod questionnaire;
mod report;

pub use dimension::Dimension;
pub use persona::{Persona, PersonaProfile};
pub use questionnaire::{Question, Questionnaire};
pub use report::{
    AggregateScores, BatchResult, HitResult, InterviewRecord, PersonaResult, ScoredRecord,
};
