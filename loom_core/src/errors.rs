//! # Error Types
//!
//! Structured error type for loom_core. Every calculator validates its own
//! inputs and reports the first violation it finds, naming the offending
//! field and value so a front end can point the operator at it.
//!
//! ## Example
//!
//! ```rust
//! use loom_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(width_m: f64) -> CalcResult<()> {
//!     if width_m <= 0.0 {
//!         return Err(CalcError::invalid_argument(
//!             "width_m",
//!             width_m.to_string(),
//!             "Width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_width(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for loom_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// The engine has a single failure mode: an argument outside its documented
/// domain. Errors are never retried or recovered inside the engine; the
/// caller corrects the input and calls again.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An argument is outside its valid domain (non-positive, out of range, unknown tag)
    #[error("Invalid argument '{field}': {value} - {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },
}

impl CalcError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidArgument {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Name of the field that failed validation
    pub fn field(&self) -> &str {
        match self {
            CalcError::InvalidArgument { field, .. } => field,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidArgument { .. } => "INVALID_ARGUMENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_argument("dtex", "-5", "Must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InvalidArgument"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_code_and_field() {
        let error = CalcError::invalid_argument("creel_capacity", "0", "Must be positive");
        assert_eq!(error.error_code(), "INVALID_ARGUMENT");
        assert_eq!(error.field(), "creel_capacity");
        assert_eq!(
            error.to_string(),
            "Invalid argument 'creel_capacity': 0 - Must be positive"
        );
    }
}
