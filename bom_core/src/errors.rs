//! # Error Types
//!
//! Structured error types for bom_core. Every failure a caller can see comes
//! out of this module, with enough context to point at the offending input
//! dimension or registry formula.
//!
//! ## Example
//!
//! ```rust
//! use bom_core::errors::{CalcError, CalcResult};
//!
//! fn validate_module_count(count: u32) -> CalcResult<()> {
//!     if count == 0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "moduleCount".to_string(),
//!             value: count.to_string(),
//!             reason: "At least one module is required".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bom_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for BOM calculations.
///
/// Each variant provides specific context about what went wrong,
/// enabling the presentation layer to show a precise message.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong parity, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A selector required by the chosen battery type is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A dimension fell outside every bucket of a range table
    #[error("{message} (table '{table}', value {value})")]
    RangeExceeded {
        table: String,
        value: f64,
        message: String,
    },

    /// A formula or catalog row produced something that is not a finite number
    #[error("Formula '{formula}' returned non-number: {value}")]
    NonFiniteResult { formula: String, value: String },

    /// Formula evaluation re-entered a formula that is still being computed
    #[error("Formula dependency cycle: {chain}")]
    FormulaCycle { chain: String },

    /// A range table is not sorted by ascending upper bound
    #[error("Range table '{table}' is not sorted ascending at rule {index}")]
    UnsortedRangeTable { table: String, index: usize },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a RangeExceeded error
    pub fn range_exceeded(table: impl Into<String>, value: f64, message: impl Into<String>) -> Self {
        CalcError::RangeExceeded {
            table: table.into(),
            value,
            message: message.into(),
        }
    }

    /// Create a NonFiniteResult error
    pub fn non_finite(formula: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::NonFiniteResult {
            formula: formula.into(),
            value: value.into(),
        }
    }

    /// Create a FormulaCycle error from the chain of formula keys
    pub fn formula_cycle<S: AsRef<str>>(chain: &[S]) -> Self {
        let chain = chain
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(" -> ");
        CalcError::FormulaCycle { chain }
    }

    /// Errors caused by what the user typed rather than by a defect in the rules
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::MissingField { .. } | CalcError::RangeExceeded { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::RangeExceeded { .. } => "RANGE_EXCEEDED",
            CalcError::NonFiniteResult { .. } => "NON_FINITE_RESULT",
            CalcError::FormulaCycle { .. } => "FORMULA_CYCLE",
            CalcError::UnsortedRangeTable { .. } => "UNSORTED_RANGE_TABLE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::range_exceeded("leg_count", 32001.0, "construction length exceeds 32000mm");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"RangeExceeded\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("system").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::non_finite("leg_count", "NaN").error_code(), "NON_FINITE_RESULT");
    }

    #[test]
    fn test_formula_cycle_chain() {
        let err = CalcError::formula_cycle(&["a", "b", "a"]);
        assert_eq!(err.to_string(), "Formula dependency cycle: a -> b -> a");
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_range_exceeded_message_is_user_facing() {
        let err = CalcError::range_exceeded("leg_count", 32001.0, "construction length exceeds 32000mm");
        assert!(err.is_user_facing());
        assert!(err.to_string().starts_with("construction length exceeds 32000mm"));
    }
}
