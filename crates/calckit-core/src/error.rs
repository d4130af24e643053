//! Calculation errors
//!
//! Every calculator validates its own inputs and reports exactly one of these.
//! "Not enough input yet" is not an error; see [`crate::Calculation::Unset`].

use thiserror::Error;

/// Result alias used by all calculators
pub type Result<T> = std::result::Result<T, CalcError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A field is missing, non-numeric, or violates a sign constraint
    #[error("{message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// A field is numeric but outside its allowed closed range
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// A divisor in an otherwise well-formed formula is zero
    #[error("{field} cannot be zero")]
    DivisionByZero { field: &'static str },

    /// Well-formed inputs produced a non-finite result
    #[error("{0}")]
    CalculationFailed(&'static str),
}

impl CalcError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Stable tag for the wire format
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "invalid_input",
            CalcError::OutOfRange { .. } => "out_of_range",
            CalcError::DivisionByZero { .. } => "division_by_zero",
            CalcError::CalculationFailed(_) => "calculation_failed",
        }
    }

    /// The offending field, when one can be named
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CalcError::InvalidInput { field, .. }
            | CalcError::OutOfRange { field, .. }
            | CalcError::DivisionByZero { field } => Some(field),
            CalcError::CalculationFailed(_) => None,
        }
    }
}

/// Reject NaN and infinities coming from a formula
pub(crate) fn ensure_finite(value: f64, message: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::CalculationFailed(message))
    }
}

/// Require `value > 0`
pub(crate) fn ensure_positive(value: f64, field: &'static str, message: &str) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, message))
    }
}

/// Require `min <= value <= max`
pub(crate) fn ensure_range(value: f64, field: &'static str, min: f64, max: f64) -> Result<f64> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(CalcError::OutOfRange { field, min, max })
    }
}
