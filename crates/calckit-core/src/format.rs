//! Display formatting for calculator results
//!
//! The engine returns raw `f64`s; these helpers apply the rounding rules the
//! pages use. Rounding goes through `Decimal` so that midpoints round away
//! from zero instead of following the binary representation.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::UnitCategory;

fn round_decimal(value: f64, places: u32) -> Option<Decimal> {
    let rounded = Decimal::from_f64(value)?
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    // Avoid printing "-0.00"
    Some(if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    })
}

/// Fixed number of decimal places (`12.50`)
pub fn format_fixed(value: f64, places: u32) -> String {
    match round_decimal(value, places) {
        Some(d) => format!("{:.*}", places as usize, d),
        None => format!("{:.*}", places as usize, value),
    }
}

/// At most `max_places` decimals, trailing zeros dropped (`12.5`, `30`)
pub fn format_number(value: f64, max_places: u32) -> String {
    match round_decimal(value, max_places) {
        Some(d) => d.normalize().to_string(),
        None => format!("{value}"),
    }
}

/// Scientific notation with `digits` fractional mantissa digits, `1.234568e+4` style
pub fn format_exponential(value: f64, digits: usize) -> String {
    let formatted = format!("{:.*e}", digits, value);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted,
    }
}

/// Precision policy of the unit converter:
/// temperature → 2 decimals; whole numbers → no decimals;
/// |x| < 0.001 or |x| > 10000 → scientific; |x| < 0.1 → 6 decimals; else 4.
pub fn format_conversion(value: f64, category: UnitCategory) -> String {
    if category == UnitCategory::Temperature {
        return format_fixed(value, 2);
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{value}");
    }

    let magnitude = value.abs();
    if !(0.001..=10000.0).contains(&magnitude) {
        format_exponential(value, 6)
    } else if magnitude < 0.1 {
        format_fixed(value, 6)
    } else {
        format_fixed(value, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(944.0, 2), "944.00");
        assert_eq!(format_fixed(33.333333, 2), "33.33");
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(30.0, 4), "30");
        assert_eq!(format_number(12.5, 2), "12.5");
        assert_eq!(format_number(1.0 / 3.0, 2), "0.33");
    }

    #[test]
    fn test_format_exponential() {
        assert_eq!(format_exponential(12345.678, 6), "1.234568e+4");
        assert_eq!(format_exponential(0.0000005, 6), "5.000000e-7");
    }

    #[test]
    fn test_conversion_policy() {
        use UnitCategory::*;
        assert_eq!(format_conversion(37.77777, Temperature), "37.78");
        assert_eq!(format_conversion(212.0, Temperature), "212.00");
        assert_eq!(format_conversion(1000.0, Length), "1000");
        assert_eq!(format_conversion(160934.5, Length), "1.609345e+5");
        assert_eq!(format_conversion(0.0005, Weight), "5.000000e-4");
        assert_eq!(format_conversion(0.0254, Length), "0.025400");
        assert_eq!(format_conversion(3.28084, Length), "3.2808");
        assert_eq!(format_conversion(0.0, Volume), "0");
    }
}
