//! Error types for bfi-assess
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Error context and chaining
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Dimension;

/// Result type alias for assessment operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Input data errors (3xx)
    QuestionnaireInvalid = 300,
    PersonaInvalid = 301,
    PersonaIndexOutOfRange = 302,
    UnknownCharacter = 303,
    SampleTooLarge = 304,

    // Generator errors (4xx)
    GeneratorFailed = 400,
    GeneratorTimeout = 401,
    GeneratorResponseMalformed = 402,

    // Scorer errors (5xx)
    ScorerFailed = 500,
    ScorerTimeout = 501,
    ScorerResponseMalformed = 502,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Input data errors
            400..=499 => 40, // Generator errors
            500..=599 => 50, // Scorer errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for the assessment harness
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Input Data Errors
    // ─────────────────────────────────────────────────────────────

    /// Questionnaire document malformed or empty
    #[error("Invalid questionnaire {path}: {message}")]
    QuestionnaireInvalid { path: PathBuf, message: String },

    /// Persona document malformed
    #[error("Invalid persona data {path}: {message}")]
    PersonaInvalid { path: PathBuf, message: String },

    /// Requested persona index does not exist
    #[error("Persona index {index} out of range (have {count} personas)")]
    PersonaIndexOutOfRange { index: usize, count: usize },

    /// Character name not found in the alias table
    #[error("Unknown character: {name}")]
    UnknownCharacter { name: String },

    /// Requested sample size exceeds the persona set
    #[error("Sample size {requested} exceeds persona count {available}")]
    SampleTooLarge { requested: usize, available: usize },

    // ─────────────────────────────────────────────────────────────
    // Collaborator Errors
    // ─────────────────────────────────────────────────────────────

    /// Response generator call failed
    #[error("Generator failed for persona '{persona}' on question {question_id}: {message}")]
    GeneratorFailed {
        persona: String,
        question_id: String,
        message: String,
    },

    /// Response generator timed out
    #[error("Generator timed out after {timeout_secs}s for persona '{persona}'")]
    GeneratorTimeout { persona: String, timeout_secs: u64 },

    /// Low-level generator request failure (wrapped with persona/question
    /// context by the collector)
    #[error("Generator request failed: {message}")]
    GeneratorRequest { message: String },

    /// Trait scorer call failed
    #[error("Scorer failed for dimension {dimension}: {message}")]
    ScorerFailed {
        dimension: Dimension,
        message: String,
    },

    /// Trait scorer timed out
    #[error("Scorer timed out after {timeout_secs}s for dimension {dimension}")]
    ScorerTimeout {
        dimension: Dimension,
        timeout_secs: u64,
    },

    /// Low-level scorer request failure (wrapped with dimension context by
    /// the scoring stage)
    #[error("Scorer request failed: {message}")]
    ScorerRequest { message: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::QuestionnaireInvalid { .. } => ErrorCode::QuestionnaireInvalid,
            Error::PersonaInvalid { .. } => ErrorCode::PersonaInvalid,
            Error::PersonaIndexOutOfRange { .. } => ErrorCode::PersonaIndexOutOfRange,
            Error::UnknownCharacter { .. } => ErrorCode::UnknownCharacter,
            Error::SampleTooLarge { .. } => ErrorCode::SampleTooLarge,

            Error::GeneratorFailed { .. } => ErrorCode::GeneratorFailed,
            Error::GeneratorTimeout { .. } => ErrorCode::GeneratorTimeout,
            Error::GeneratorRequest { .. } => ErrorCode::GeneratorFailed,

            Error::ScorerFailed { .. } => ErrorCode::ScorerFailed,
            Error::ScorerTimeout { .. } => ErrorCode::ScorerTimeout,
            Error::ScorerRequest { .. } => ErrorCode::ScorerFailed,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Check if the error is retryable (transient collaborator failures)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::GeneratorFailed { .. }
                | Error::GeneratorTimeout { .. }
                | Error::GeneratorRequest { .. }
                | Error::ScorerFailed { .. }
                | Error::ScorerTimeout { .. }
                | Error::ScorerRequest { .. }
                | Error::Io(_)
        )
    }

    /// Check if the error is fatal to the whole run (bad input or config)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConfigNotFound { .. }
                | Error::ConfigParse { .. }
                | Error::ConfigValidation { .. }
                | Error::QuestionnaireInvalid { .. }
                | Error::PersonaInvalid { .. }
                | Error::PersonaIndexOutOfRange { .. }
                | Error::UnknownCharacter { .. }
                | Error::SampleTooLarge { .. }
                | Error::Internal(_)
        )
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'bfi-assess config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'bfi-assess config validate' to see details."
            ),
            Error::ConfigValidation { .. } => Some(
                "Review the configuration file and fix the invalid values. See documentation for valid options."
            ),

            Error::QuestionnaireInvalid { .. } => Some(
                "The questionnaire must be a JSON document with a non-empty 'questions' array, each entry carrying an id, text, and Big-Five dimension."
            ),
            Error::PersonaInvalid { .. } => Some(
                "Each persona needs a 'profile' object with at least a 'name' field."
            ),
            Error::PersonaIndexOutOfRange { .. } => Some(
                "Pass a persona index smaller than the number of personas in the input file."
            ),
            Error::UnknownCharacter { .. } => Some(
                "Check the characters file for the list of known names and aliases."
            ),
            Error::SampleTooLarge { .. } => Some(
                "Reduce --sample-size or omit it to assess the full persona set."
            ),

            Error::GeneratorFailed { .. }
            | Error::GeneratorTimeout { .. }
            | Error::GeneratorRequest { .. } => Some(
                "Check that the generator backend is reachable and its base_url/api_key are correct. Use '--backend mock' for an offline dry run."
            ),
            Error::ScorerFailed { .. }
            | Error::ScorerTimeout { .. }
            | Error::ScorerRequest { .. } => Some(
                "Check that the scorer backend is reachable, or raise timeout_secs in the [scorer] config section."
            ),

            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!("\x1b[31mError [{}]\x1b[0m: {}\n", code.as_str(), self);

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        let code = self.code();
        format!("[{}] {}", code.as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound {
            path: path.into(),
            source: None,
        }
    }

    /// Create a config validation error
    pub fn config_validation(message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        let field = field.into();
        Error::ConfigValidation {
            message: format!("{}: {}", field, message.into()),
            field: Some(field),
        }
    }

    /// Create a generator failed error with persona/question context
    pub fn generator_failed(
        persona: impl Into<String>,
        question_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::GeneratorFailed {
            persona: persona.into(),
            question_id: question_id.into(),
            message: message.into(),
        }
    }

    /// Create a scorer failed error
    pub fn scorer_failed(dimension: Dimension, message: impl Into<String>) -> Self {
        Error::ScorerFailed {
            dimension,
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::QuestionnaireInvalid.as_str(), "E300");
        assert_eq!(ErrorCode::GeneratorFailed.as_str(), "E400");
        assert_eq!(ErrorCode::InternalError.as_str(), "E900");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 10);
        assert_eq!(ErrorCode::IoRead.exit_code(), 20);
        assert_eq!(ErrorCode::PersonaInvalid.exit_code(), 30);
        assert_eq!(ErrorCode::GeneratorFailed.exit_code(), 40);
        assert_eq!(ErrorCode::ScorerFailed.exit_code(), 50);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_error_display() {
        let err = Error::PersonaIndexOutOfRange { index: 9, count: 3 };
        assert!(err.to_string().contains("index 9"));
        assert!(err.to_string().contains("3 personas"));
    }

    #[test]
    fn test_error_codes() {
        let err = Error::config_not_found("/test");
        assert_eq!(err.code(), ErrorCode::ConfigNotFound);

        let err = Error::generator_failed("Socrates", "Q1", "connection refused");
        assert_eq!(err.code(), ErrorCode::GeneratorFailed);

        let err = Error::scorer_failed(Dimension::Openness, "timeout");
        assert_eq!(err.code(), ErrorCode::ScorerFailed);
    }

    #[test]
    fn test_error_retryable() {
        assert!(Error::generator_failed("p", "q", "refused").is_retryable());
        assert!(Error::scorer_failed(Dimension::Openness, "refused").is_retryable());
        assert!(!Error::config_not_found("/test").is_retryable());
        assert!(!Error::UnknownCharacter { name: "x".into() }.is_retryable());
    }

    #[test]
    fn test_error_fatal() {
        assert!(Error::config_not_found("/test").is_fatal());
        assert!(Error::SampleTooLarge { requested: 10, available: 2 }.is_fatal());
        assert!(!Error::generator_failed("p", "q", "refused").is_fatal());
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::config_not_found("/test");
        assert!(err.suggestion().is_some());
        assert!(err.suggestion().unwrap().contains("config init"));

        let err = Error::generator_failed("p", "q", "refused");
        assert!(err.suggestion().unwrap().contains("mock"));
    }

    #[test]
    fn test_format_for_terminal() {
        let err = Error::config_not_found("/test/config.toml");
        let formatted = err.format_for_terminal();

        assert!(formatted.contains("E100"));
        assert!(formatted.contains("\x1b[31m"));
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_format_for_log() {
        let err = Error::config_not_found("/test/config.toml");
        let formatted = err.format_for_log();

        assert!(formatted.contains("[E100]"));
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        assert_eq!(err.code(), ErrorCode::IoNotFound);
    }
}
