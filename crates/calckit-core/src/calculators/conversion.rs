//! Unit conversion
//!
//! Length, weight and volume scale linearly through the category's base unit.
//! Temperatures are affine, so they pivot through Celsius with explicit formulas.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_finite, CalcError, Result};
use crate::format::{format_conversion, format_fixed};
use crate::types::{Unit, UnitCategory};

/// Convert `value` from one unit to another of the same category
pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64> {
    if from.category() != to.category() {
        return Err(CalcError::invalid(
            "To unit",
            format!(
                "Cannot convert {} to {}",
                from.category(),
                to.category()
            ),
        ));
    }
    if from == to {
        return Ok(value);
    }

    let converted = match (from.to_base_factor(), to.to_base_factor()) {
        (Some(from_factor), Some(to_factor)) => value * from_factor / to_factor,
        _ => from_celsius(to_celsius(value, from), to),
    };
    ensure_finite(converted, "Error during conversion. Please check your inputs.")
}

fn to_celsius(value: f64, from: Unit) -> f64 {
    match from {
        Unit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        Unit::Kelvin => value - 273.15,
        _ => value,
    }
}

fn from_celsius(celsius: f64, to: Unit) -> f64 {
    match to {
        Unit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        Unit::Kelvin => celsius + 273.15,
        _ => celsius,
    }
}

/// A value with a selected unit pair, as shown by the converter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
}

impl Conversion {
    pub fn new(value: f64, from: Unit, to: Unit) -> Self {
        Self { value, from, to }
    }

    /// Same value with the default unit pair of `category`
    pub fn with_defaults(value: f64, category: UnitCategory) -> Self {
        let (from, to) = category.default_pair();
        Self::new(value, from, to)
    }

    /// Exchange the from/to units; the value is kept as entered
    pub fn swapped(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            ..self
        }
    }

    pub fn run(&self) -> Result<ConversionResult> {
        let result = convert(self.value, self.from, self.to)?;
        Ok(ConversionResult {
            value: self.value,
            from: self.from,
            to: self.to,
            result,
            display: format_conversion(result, self.to.category()),
            explanation: explain(self.from, self.to),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
    pub result: f64,
    /// `result` formatted with the converter's precision policy
    pub display: String,
    pub explanation: String,
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display, self.to)
    }
}

/// One-line description of the conversion rate between two units
pub fn explain(from: Unit, to: Unit) -> String {
    if from.category() == UnitCategory::Temperature {
        return "Temperature conversion uses specific formulas, not a simple ratio.".to_string();
    }
    match convert(1.0, from, to) {
        Ok(rate) => format!("1 {} = {} {}", from.name(), format_fixed(rate, 6), to.name()),
        Err(err) => err.to_string(),
    }
}
