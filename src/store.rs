//! Loading and persisting assessment documents
//!
//! Plain serde_json (de)serialization with path-carrying errors. The batch
//! result is written exactly once, at the end of a run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{BatchResult, Persona, Questionnaire};

/// Load the BFI questionnaire document.
pub fn load_questionnaire(path: &Path) -> Result<Questionnaire> {
    let expanded = expand(path);
    let content = read(&expanded)?;

    let questionnaire: Questionnaire =
        serde_json::from_str(&content).map_err(|e| Error::QuestionnaireInvalid {
            path: expanded.clone(),
            message: e.to_string(),
        })?;

    if questionnaire.is_empty() {
        return Err(Error::QuestionnaireInvalid {
            path: expanded,
            message: "questionnaire has no questions".to_string(),
        });
    }

    debug!(
        path = %expanded.display(),
        questions = questionnaire.len(),
        "Questionnaire loaded"
    );
    Ok(questionnaire)
}

/// Load the persona set document.
pub fn load_personas(path: &Path) -> Result<Vec<Persona>> {
    let expanded = expand(path);
    let content = read(&expanded)?;

    let personas: Vec<Persona> =
        serde_json::from_str(&content).map_err(|e| Error::PersonaInvalid {
            path: expanded.clone(),
            message: e.to_string(),
        })?;

    debug!(path = %expanded.display(), count = personas.len(), "Personas loaded");
    Ok(personas)
}

/// Look up a persona by its index in the set.
pub fn persona_by_index(personas: &[Persona], index: usize) -> Result<&Persona> {
    personas
        .get(index)
        .ok_or(Error::PersonaIndexOutOfRange {
            index,
            count: personas.len(),
        })
}

/// Write the batch result as pretty-printed JSON.
pub fn write_results(path: &Path, results: &BatchResult) -> Result<()> {
    let expanded = expand(path);

    if let Some(parent) = expanded.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let content = serde_json::to_string_pretty(results)
        .map_err(|e| Error::Internal(format!("failed to serialize results: {}", e)))?;

    fs::write(&expanded, content).map_err(|e| Error::IoWrite {
        path: expanded.clone(),
        source: e,
    })?;

    info!(path = %expanded.display(), personas = results.len(), "Results written");
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::IoRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string())
}
