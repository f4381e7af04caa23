//! # Error Types
//!
//! Structured error types for estimate_core.
//!
//! The estimation engine itself never fails: validation problems are reported
//! as [`StepValidationResult`](crate::model::StepValidationResult) values and
//! incomplete snapshots produce partial results. Errors only appear at the
//! boundary, when settings or snapshots are loaded from JSON or disk.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, EstimateResult};
//!
//! fn check_sizes(sizes: &[f64]) -> EstimateResult<()> {
//!     if sizes.is_empty() {
//!         return Err(EstimateError::invalid_input(
//!             "adhesive_kg",
//!             "[]",
//!             "At least one package size is required",
//!         ));
//!     }
//!     Ok(())
//! }
//! # assert!(check_sizes(&[]).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core boundary operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for loading and checking engine inputs.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for EstimateError {
    fn from(err: serde_json::Error) -> Self {
        EstimateError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EstimateError::invalid_input("grout_kg", "-5.0", "Package sizes must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: EstimateError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EstimateError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(
            EstimateError::file_error("read", "a.json", "not found").error_code(),
            "FILE_ERROR"
        );
        assert_eq!(EstimateError::invalid_input("x", "1", "bad").error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let json = r#"{ "type": "Internal", "details": { "message": "boom" } }"#;
        assert!(serde_json::from_str::<EstimateError>(json).is_err());
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<f64>("not a number").unwrap_err();
        let converted: EstimateError = err.into();
        assert_eq!(converted.error_code(), "SERIALIZATION_ERROR");
    }
}
