//! Character alias resolution
//!
//! Maps alternate character names to canonical identifiers. Built from a
//! characters JSON document of the shape:
//!
//! ```json
//! { "Beethoven-1770": { "alias": ["Beethoven", "Ludwig van Beethoven"] } }
//! ```
//!
//! Each canonical id also resolves to itself, as does the id truncated at
//! its last `-` (so "Beethoven-1770" is reachable as "Beethoven").

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Per-character entry in the characters document.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterInfo {
    /// Alternate names for this character.
    #[serde(default)]
    pub alias: Vec<String>,
}

/// Alias → canonical character id lookup table.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    alias_to_canonical: HashMap<String, String>,
}

impl AliasTable {
    /// Build the table from a parsed characters document.
    pub fn from_characters(characters: &HashMap<String, CharacterInfo>) -> Self {
        let mut alias_to_canonical = HashMap::new();

        for (canonical, info) in characters {
            for alias in &info.alias {
                alias_to_canonical.insert(alias.clone(), canonical.clone());
            }
            alias_to_canonical.insert(canonical.clone(), canonical.clone());
            if let Some(pos) = canonical.rfind('-') {
                alias_to_canonical.insert(canonical[..pos].to_string(), canonical.clone());
            }
        }

        Self { alias_to_canonical }
    }

    /// Load and build the table from a characters JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
        let content = std::fs::read_to_string(&expanded).map_err(|e| Error::IoRead {
            path: expanded.clone().into(),
            source: e,
        })?;

        let characters: HashMap<String, CharacterInfo> = serde_json::from_str(&content)
            .map_err(|e| Error::PersonaInvalid {
                path: expanded.into(),
                message: format!("characters document: {}", e),
            })?;

        let table = Self::from_characters(&characters);
        debug!(entries = table.alias_to_canonical.len(), "Alias table built");
        Ok(table)
    }

    /// Resolve a name or alias to the canonical character id.
    pub fn resolve(&self, name: &str) -> Result<&str> {
        self.alias_to_canonical
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownCharacter {
                name: name.to_string(),
            })
    }

    /// Number of known aliases (including canonical ids).
    pub fn len(&self) -> usize {
        self.alias_to_canonical.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.alias_to_canonical.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> AliasTable {
        let mut characters = HashMap::new();
        characters.insert(
            "Beethoven-1770".to_string(),
            CharacterInfo {
                alias: vec!["Ludwig van Beethoven".to_string()],
            },
        );
        AliasTable::from_characters(&characters)
    }

    #[test]
    fn test_resolve_alias() {
        let table = sample_table();
        assert_eq!(table.resolve("Ludwig van Beethoven").unwrap(), "Beethoven-1770");
    }

    #[test]
    fn test_resolve_canonical_id() {
        let table = sample_table();
        assert_eq!(table.resolve("Beethoven-1770").unwrap(), "Beethoven-1770");
    }

    #[test]
    fn test_resolve_truncated_id() {
        let table = sample_table();
        assert_eq!(table.resolve("Beethoven").unwrap(), "Beethoven-1770");
    }

    #[test]
    fn test_resolve_unknown() {
        let table = sample_table();
        let err = table.resolve("Mozart").unwrap_err();
        assert!(matches!(err, Error::UnknownCharacter { .. }));
    }
}
