//! Core error types for esg-core.
//!
//! Each concern (catalog authoring, answer collection, export, configuration)
//! has its own error enum; [`CoreError`] wraps them for callers that want a
//! single type.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for esg-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog validation errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Answer collection errors
    #[error("Answer error: {0}")]
    Answer(#[from] AnswerError),

    /// Export / results-view errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Catalog authoring errors, raised when a catalog is constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Two questions share an identifier
    #[error("Duplicate question id: {0}")]
    DuplicateId(String),

    /// Weight is zero, negative or non-finite
    #[error("Question '{id}' has invalid weight {weight}: weights must be positive and finite")]
    InvalidWeight { id: String, weight: f64 },

    /// min > max, or a bound is non-finite
    #[error("Question '{id}' has invalid envelope [{min}, {max}]")]
    InvalidEnvelope { id: String, min: f64, max: f64 },

    /// idealRange with lo > hi
    #[error("Question '{id}' has invalid ideal range [{lo}, {hi}]")]
    InvalidIdealRange { id: String, lo: f64, hi: f64 },

    /// idealValue, an idealRange bound or a scoringScale breakpoint is NaN or infinite
    #[error("Question '{id}' has a non-finite {field}")]
    NonFiniteTarget { id: String, field: &'static str },

    /// Formula question without operands
    #[error("Formula question '{0}' declares no formula inputs")]
    MissingFormulaInputs(String),

    /// inputLabels not aligned with formulaInputs
    #[error("Question '{id}' has {labels} input labels for {inputs} formula inputs")]
    MismatchedLabels {
        id: String,
        inputs: usize,
        labels: usize,
    },
}

/// Errors reported by `set_answer` / `set_operand`. None of them change state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnswerError {
    /// Question id absent from the catalog
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    /// Operand name not listed in the question's formula inputs
    #[error("Unknown operand '{operand}' for question '{question}'")]
    UnknownOperand { question: String, operand: String },

    /// Operand submitted for a question that is not formula-backed
    #[error("Question '{0}' is not a formula question")]
    NotFormula(String),

    /// Direct answer submitted for a formula-backed question
    #[error("Question '{0}' is formula-backed; submit its operands instead")]
    FormulaQuestion(String),

    /// NaN or infinite input value
    #[error("Non-finite value submitted for question '{0}'")]
    NonFiniteValue(String),
}

/// Export envelope and results-gate errors.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Results view password mismatch
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Envelope text does not have the expected shape
    #[error("Malformed export envelope: {0}")]
    MalformedEnvelope(String),

    /// Envelope payload is not valid base64
    #[error("Envelope payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Payload is not a valid report
    #[error("Report JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Config directory could not be determined
    #[error("Could not determine a configuration directory")]
    NoConfigDir,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_errors_wrap_into_core_error() {
        let err: CoreError = AnswerError::UnknownQuestion("ghost".into()).into();
        assert_eq!(err.to_string(), "Answer error: Unknown question: ghost");
    }

    #[test]
    fn catalog_error_messages_name_the_question() {
        let err = CatalogError::InvalidWeight {
            id: "board_independence".into(),
            weight: 0.0,
        };
        assert!(err.to_string().contains("board_independence"));
    }
}
