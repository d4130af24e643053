//! Percentage calculators: percent-of, what-percent, percent-change

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_finite, CalcError, Result};

const OVERFLOW: &str = "Result is too large to calculate. Please check your inputs.";
use crate::format::format_number;

/// Sign of a percent change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

/// Percent change as magnitude plus direction; `magnitude` is never negative
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangeResult {
    pub magnitude: f64,
    pub direction: Direction,
}

impl fmt::Display for ChangeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self.direction {
            Direction::Increase => "increase",
            Direction::Decrease => "decrease",
        };
        write!(f, "{}% {}", format_number(self.magnitude, 2), word)
    }
}

/// `percent`% of `value`
pub fn percent_of(percent: f64, value: f64) -> Result<f64> {
    ensure_finite(percent * value / 100.0, OVERFLOW)
}

/// What percent `part` is of `whole`
pub fn what_percent(part: f64, whole: f64) -> Result<f64> {
    if whole == 0.0 {
        return Err(CalcError::DivisionByZero { field: "Whole" });
    }
    ensure_finite(part / whole * 100.0, OVERFLOW)
}

/// Relative change from `from` to `to`. A zero change counts as an increase.
pub fn percent_change(from: f64, to: f64) -> Result<ChangeResult> {
    if from == 0.0 {
        return Err(CalcError::DivisionByZero {
            field: "Starting value",
        });
    }

    let change = to - from;
    let magnitude = ensure_finite((change / from * 100.0).abs(), OVERFLOW)?;
    Ok(ChangeResult {
        magnitude,
        direction: if change >= 0.0 {
            Direction::Increase
        } else {
            Direction::Decrease
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(20.0, 150.0), Ok(30.0));
        assert_eq!(percent_of(0.0, 150.0), Ok(0.0));
        assert_eq!(percent_of(50.0, -80.0), Ok(-40.0));
    }

    #[test]
    fn test_what_percent() {
        assert_eq!(what_percent(30.0, 150.0), Ok(20.0));
        assert_eq!(
            what_percent(30.0, 0.0),
            Err(CalcError::DivisionByZero { field: "Whole" })
        );
    }

    #[test]
    fn test_percent_change() {
        let up = percent_change(100.0, 120.0).unwrap();
        assert!((up.magnitude - 20.0).abs() < 1e-9);
        assert_eq!(up.direction, Direction::Increase);
        assert_eq!(up.to_string(), "20% increase");

        let down = percent_change(200.0, 150.0).unwrap();
        assert_eq!(down.magnitude, 25.0);
        assert_eq!(down.direction, Direction::Decrease);
    }

    #[test]
    fn test_no_change_is_increase() {
        let same = percent_change(42.0, 42.0).unwrap();
        assert_eq!(same.magnitude, 0.0);
        assert_eq!(same.direction, Direction::Increase);
    }

    #[test]
    fn test_negative_base_keeps_magnitude_positive() {
        let change = percent_change(-50.0, -25.0).unwrap();
        assert_eq!(change.magnitude, 50.0);
        assert_eq!(change.direction, Direction::Increase);
    }

    #[test]
    fn test_overflowing_results_fail() {
        assert_eq!(
            percent_of(1e308, 1e308).unwrap_err().kind(),
            "calculation_failed"
        );
        assert_eq!(
            what_percent(1.0, 1e-320).unwrap_err().kind(),
            "calculation_failed"
        );
        assert_eq!(
            percent_change(1e-320, 1.0).unwrap_err().kind(),
            "calculation_failed"
        );
    }

    #[test]
    fn test_zero_base() {
        assert!(percent_change(0.0, 10.0).is_err());
    }
}
