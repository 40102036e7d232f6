//! Error types for the criteria crate.

use thiserror::Error;

/// Errors that can occur when building, parsing or converting criteria.
#[derive(Debug, Error)]
pub enum CriteriaError {
    /// A filter, pagination directive or target failed validation.
    #[error("invalid '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// Boolean operator used with the wrong number of operands.
    #[error("invalid composition: {0}")]
    InvalidComposition(String),

    /// An empty filter group nested inside a composite node.
    #[error("criteria contains an empty filter group that cannot be expressed")]
    EmptyCriteria,

    /// The converter does not know how to render an operator.
    #[error("operator '{operator}' is not supported by the {converter} converter")]
    UnsupportedOperator {
        operator: String,
        converter: &'static str,
    },

    /// Malformed rule document.
    #[error("invalid rule: {0}")]
    Rule(String),

    /// Rule document is not valid JSON.
    #[error("invalid rule document: {0}")]
    Json(#[from] serde_json::Error),
}

impl CriteriaError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CriteriaError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for criteria operations.
pub type Result<T> = std::result::Result<T, CriteriaError>;
