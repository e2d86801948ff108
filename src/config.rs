//! Configuration system for bfi-assess
//!
//! Supports multiple configuration sources with the following precedence
//! (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (BFI_ASSESS_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Main assessment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessConfig {
    /// Core pipeline knobs (tolerance, sampling, seed)
    pub assessment: AssessmentSettings,

    /// Response generator backend settings
    pub generator: BackendSettings,

    /// Trait scorer backend settings
    pub scorer: BackendSettings,

    /// Logging configuration
    pub logging: LoggingSettings,

    /// Input/output document paths
    pub storage: StorageSettings,
}

/// Core pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentSettings {
    /// hit@k tolerance: a dimension hits iff |expected - mean| <= k
    pub tolerance_k: u32,

    /// Assess only a random sample of this many personas (None = all)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<usize>,

    /// Seed for deterministic persona sampling
    pub seed: u64,

    /// On a collaborator failure, skip that persona and continue the batch
    /// instead of aborting the whole run
    pub skip_failed: bool,
}

/// Settings for one LLM-backed collaborator (generator or scorer)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Backend kind: "openai" or "mock"
    pub backend: String,

    /// API base URL (e.g., "https://api.openai.com/v1", "http://localhost:11434/v1")
    pub base_url: String,

    /// API key (empty string for local servers like Ollama)
    pub api_key: String,

    /// Model identifier (e.g., "gpt-4o", "llama3")
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    pub max_retries: u32,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

/// Input/output document paths
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// BFI questionnaire JSON document
    pub questionnaire_path: String,

    /// Persona set JSON document
    pub personas_path: String,

    /// Character alias table JSON document (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters_path: Option<String>,

    /// Where the batch result is written
    pub output_path: String,
}

// ─────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────

impl Default for AssessConfig {
    fn default() -> Self {
        Self {
            assessment: AssessmentSettings::default(),
            generator: BackendSettings::default(),
            scorer: BackendSettings::default(),
            logging: LoggingSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            tolerance_k: 1,
            sample_size: None,
            seed: 42,
            skip_failed: false,
        }
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            backend: "openai".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            json_format: false,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            questionnaire_path: "./data/BFI.json".to_string(),
            personas_path: "./data/big5-1024-persona.json".to_string(),
            characters_path: None,
            output_path: "./assessment_results.json".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Loading & Validation
// ─────────────────────────────────────────────────────────────────

impl AssessConfig {
    /// Load configuration from the given path, the default location, or
    /// fall back to defaults if no file exists anywhere.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let expanded = expand_path(p);
                if !expanded.exists() {
                    return Err(Error::config_not_found(expanded));
                }
                Self::from_file(&expanded)?
            }
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    debug!("No configuration file found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file.
    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: AssessConfig = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            message: format!("{} ({})", e, path.display()),
            source: Some(e),
        })?;

        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// The default configuration file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bfi-assess")
            .join("config.toml")
    }

    /// Apply environment variable overrides (BFI_ASSESS_* prefix).
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = env::var("BFI_ASSESS_GENERATOR_API_KEY") {
            self.generator.api_key = key;
        }
        if let Ok(key) = env::var("BFI_ASSESS_SCORER_API_KEY") {
            self.scorer.api_key = key;
        }
        if let Ok(level) = env::var("BFI_ASSESS_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for (section, backend) in [("generator", &self.generator), ("scorer", &self.scorer)] {
            match backend.backend.as_str() {
                "openai" | "mock" => {}
                other => {
                    return Err(Error::config_field_invalid(
                        format!("{}.backend", section),
                        format!("unknown backend '{}' (valid: openai, mock)", other),
                    ));
                }
            }
            if backend.timeout_secs == 0 {
                return Err(Error::config_field_invalid(
                    format!("{}.timeout_secs", section),
                    "timeout must be greater than zero",
                ));
            }
            if backend.backend == "openai" && backend.base_url.is_empty() {
                return Err(Error::config_field_invalid(
                    format!("{}.base_url", section),
                    "base_url must be set for the openai backend",
                ));
            }
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "warning" | "error" => {}
            other => {
                return Err(Error::config_field_invalid(
                    "logging.level",
                    format!("unknown log level '{}'", other),
                ));
            }
        }

        if let Some(0) = self.assessment.sample_size {
            return Err(Error::config_field_invalid(
                "assessment.sample_size",
                "sample size must be at least 1 (omit to assess all personas)",
            ));
        }

        Ok(())
    }
}

/// Expand ~ in a path.
fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string())
}

// ─────────────────────────────────────────────────────────────────
// Config Initialization
// ─────────────────────────────────────────────────────────────────

/// Write a default configuration file at the given path (or the default
/// location). Refuses to overwrite unless `force` is set.
pub fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let target = match path {
        Some(p) => expand_path(p),
        None => AssessConfig::default_path(),
    };

    if target.exists() && !force {
        return Err(Error::config_validation(format!(
            "Configuration file already exists at {} (use --force to overwrite)",
            target.display()
        )));
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let config = AssessConfig::default();
    let content = toml::to_string_pretty(&config)?;
    fs::write(&target, content).map_err(|e| Error::IoWrite {
        path: target.clone(),
        source: e,
    })?;

    println!("Configuration written to {}", target.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
