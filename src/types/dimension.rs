//! The Big-Five personality dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five BFI trait dimensions.
///
/// Questions are tagged with exactly one dimension; scores are aggregated
/// per dimension. Serialized by the English trait name, matching the
/// questionnaire and persona documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl Dimension {
    /// Stable string form used in documents and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Openness => "Openness",
            Dimension::Conscientiousness => "Conscientiousness",
            Dimension::Extraversion => "Extraversion",
            Dimension::Agreeableness => "Agreeableness",
            Dimension::Neuroticism => "Neuroticism",
        }
    }

    /// All dimensions in canonical OCEAN order.
    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::Openness,
            Dimension::Conscientiousness,
            Dimension::Extraversion,
            Dimension::Agreeableness,
            Dimension::Neuroticism,
        ]
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openness" => Ok(Dimension::Openness),
            "conscientiousness" => Ok(Dimension::Conscientiousness),
            "extraversion" | "extroversion" => Ok(Dimension::Extraversion),
            "agreeableness" => Ok(Dimension::Agreeableness),
            "neuroticism" => Ok(Dimension::Neuroticism),
            _ => Err(format!(
                "Unknown dimension '{}'. Valid: Openness, Conscientiousness, Extraversion, Agreeableness, Neuroticism",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_from_str() {
        assert_eq!("Openness".parse::<Dimension>().unwrap(), Dimension::Openness);
        assert_eq!(
            "neuroticism".parse::<Dimension>().unwrap(),
            Dimension::Neuroticism
        );
        assert_eq!(
            "extroversion".parse::<Dimension>().unwrap(),
            Dimension::Extraversion
        );
        assert!("Honesty".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_dimension_all() {
        assert_eq!(Dimension::all().len(), 5);
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Dimension::Agreeableness).unwrap();
        assert_eq!(json, "\"Agreeableness\"");
        let parsed: Dimension = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Dimension::Agreeableness);
    }
}
