//! Errors raised while evaluating access rules.
//!
//! Both variants indicate a rule whose `matches` predicate is looser than the
//! assumptions its `rights_for` makes. They are configuration defects, so the
//! registry never recovers from them.

use thiserror::Error;

/// Error type for rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The model was not of the type a rule required.
    #[error("Type mismatch: rule expected model of type {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// The field value could not be coerced to the type a rule required.
    #[error("Value type mismatch on field '{field}': expected {expected}, got {actual}")]
    ValueTypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
}

impl AccessError {
    /// Returns a short label for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::ValueTypeMismatch { .. } => "value_type_mismatch",
        }
    }
}

/// Result type for rule evaluation.
pub type Result<T> = std::result::Result<T, AccessError>;
