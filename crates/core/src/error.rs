//! Contract error model.

use thiserror::Error;

/// Result type used across the contracts layer.
pub type ContractResult<T> = Result<T, ValidationError>;

/// Construction-time validation failure.
///
/// Every variant carries the path of the offending field. Validation is
/// all-or-nothing: invalid input is rejected, never coerced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent from the input.
    #[error("{field}: missing required field")]
    MissingField { field: String },

    /// A field's value does not match its declared semantic type.
    #[error("{field}: {reason}")]
    TypeMismatch { field: String, reason: String },

    /// An enum field holds a value outside the declared variant set.
    #[error("{field}: '{value}' is not one of the declared {expected} values")]
    OutOfDomain {
        field: String,
        value: String,
        expected: String,
    },

    /// A cross-field invariant was violated.
    #[error("{field}: {reason}")]
    InvariantViolation { field: String, reason: String },
}

impl ValidationError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn out_of_domain(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::OutOfDomain {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    pub fn invariant(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Path of the field the error is attached to.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field }
            | Self::TypeMismatch { field, .. }
            | Self::OutOfDomain { field, .. }
            | Self::InvariantViolation { field, .. } => field,
        }
    }
}
