//! Tri-state outcome of an interactive calculation

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

use crate::error::{self, CalcError};

/// What a calculator page shows for its current inputs
#[derive(Debug, Clone, PartialEq)]
pub enum Calculation<T> {
    /// Not enough input yet; render a neutral placeholder
    Unset,
    /// A computed result record
    Ready(T),
    /// Inputs are present but rejected; render a warning
    Failed(CalcError),
}

impl<T> Calculation<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Calculation::Unset)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Calculation::Failed(_))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Calculation::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Calculation::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CalcError> {
        match self {
            Calculation::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Calculation<U> {
        match self {
            Calculation::Unset => Calculation::Unset,
            Calculation::Ready(value) => Calculation::Ready(f(value)),
            Calculation::Failed(err) => Calculation::Failed(err),
        }
    }
}

impl<T> From<error::Result<T>> for Calculation<T> {
    fn from(result: error::Result<T>) -> Self {
        match result {
            Ok(value) => Calculation::Ready(value),
            Err(err) => Calculation::Failed(err),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Calculation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Calculation::Unset => Ok(()),
            Calculation::Ready(value) => write!(f, "{value}"),
            Calculation::Failed(err) => write!(f, "Error: {err}"),
        }
    }
}

/// `{"status": "unset"}`, `{"status": "ready", "result": ..}` or
/// `{"status": "error", "kind": .., "field": .., "message": ..}`
impl<T: Serialize> Serialize for Calculation<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Calculation::Unset => {
                let mut s = serializer.serialize_struct("Calculation", 1)?;
                s.serialize_field("status", "unset")?;
                s.end()
            }
            Calculation::Ready(value) => {
                let mut s = serializer.serialize_struct("Calculation", 2)?;
                s.serialize_field("status", "ready")?;
                s.serialize_field("result", value)?;
                s.end()
            }
            Calculation::Failed(err) => {
                let mut s = serializer.serialize_struct("Calculation", 4)?;
                s.serialize_field("status", "error")?;
                s.serialize_field("kind", err.kind())?;
                s.serialize_field("field", &err.field())?;
                s.serialize_field("message", &err.to_string())?;
                s.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: Calculation<f64> = Ok(2.0).into();
        assert_eq!(ok.ready(), Some(&2.0));

        let failed: Calculation<f64> = Err(CalcError::DivisionByZero { field: "Whole" }).into();
        assert!(failed.is_error());
        assert_eq!(failed.to_string(), "Error: Whole cannot be zero");
    }

    #[test]
    fn test_unset_displays_nothing() {
        let unset: Calculation<f64> = Calculation::Unset;
        assert_eq!(unset.to_string(), "");
        assert!(unset.map(|v| v * 2.0).is_unset());
    }

    #[test]
    fn test_serialize_shapes() {
        let ready: Calculation<f64> = Calculation::Ready(1.5);
        assert_eq!(
            serde_json::to_value(&ready).unwrap(),
            serde_json::json!({"status": "ready", "result": 1.5})
        );

        let failed: Calculation<f64> = Calculation::Failed(CalcError::invalid("Weight", "bad"));
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({
                "status": "error",
                "kind": "invalid_input",
                "field": "Weight",
                "message": "bad"
            })
        );
    }
}
