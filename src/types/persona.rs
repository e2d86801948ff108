//! Persona document types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Dimension;

/// A simulated character to be interviewed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Identity profile, including the display name and optional
    /// expected trait scores.
    pub profile: PersonaProfile,
}

/// Identity profile of a persona.
///
/// `expected_scores` may be partial or absent entirely. An absent entry
/// means "no claim made about this dimension" at the data-model level;
/// how the evaluator treats that is its own documented decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaProfile {
    /// Display name, used as the key in the batch result.
    pub name: String,

    /// Target score per dimension, where the dataset makes a claim.
    #[serde(default)]
    pub expected_scores: HashMap<Dimension, f64>,

    /// Free-form identity fields (background, style, etc.) carried through
    /// untouched so the generator backend can include them in its prompt.
    #[serde(flatten)]
    pub identity: serde_json::Map<String, serde_json::Value>,
}

impl Persona {
    /// Display name shortcut.
    pub fn name(&self) -> &str {
        &self.profile.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_with_expected_scores() {
        let json = r#"{
            "profile": {
                "name": "Beethoven-1770",
                "background": "Composer and pianist of the Classical era.",
                "expected_scores": {"Openness": 5, "Neuroticism": 4}
            }
        }"#;
        let p: Persona = serde_json::from_str(json).unwrap();
        assert_eq!(p.name(), "Beethoven-1770");
        assert_eq!(p.profile.expected_scores[&Dimension::Openness], 5.0);
        assert!(p.profile.identity.contains_key("background"));
    }

    #[test]
    fn test_persona_without_expected_scores() {
        // Absent map deserializes to empty, never to zeros.
        let json = r#"{"profile": {"name": "Cleopatra"}}"#;
        let p: Persona = serde_json::from_str(json).unwrap();
        assert!(p.profile.expected_scores.is_empty());
    }
}
