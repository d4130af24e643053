//! Raw field parsing
//!
//! Pages hand over whatever the user has typed so far. An empty field means
//! "not provided yet" and parses to `None`; anything else must be a finite
//! number (or an ISO date) or the field is rejected.

use chrono::NaiveDate;

use crate::error::{CalcError, Result};

/// Parse a decimal field. Blank input yields `Ok(None)`.
pub fn parse_number(raw: &str, field: &'static str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(CalcError::invalid(
            field,
            format!("{field}: please enter a valid number"),
        )),
    }
}

/// Parse an optional decimal field, falling back to `default` when blank
pub fn parse_number_or(raw: &str, field: &'static str, default: f64) -> Result<f64> {
    Ok(parse_number(raw, field)?.unwrap_or(default))
}

/// Parse a `YYYY-MM-DD` date field. Blank input yields `Ok(None)`.
pub fn parse_date(raw: &str, field: &'static str) -> Result<Option<NaiveDate>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| CalcError::invalid(field, "Please enter valid dates"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_unset() {
        assert_eq!(parse_number("", "Amount"), Ok(None));
        assert_eq!(parse_number("   ", "Amount"), Ok(None));
        assert_eq!(parse_date("", "Start date"), Ok(None));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_number("42", "Amount"), Ok(Some(42.0)));
        assert_eq!(parse_number(" -3.5 ", "Amount"), Ok(Some(-3.5)));
        assert_eq!(parse_number("1e3", "Amount"), Ok(Some(1000.0)));
        assert_eq!(parse_number_or("", "Tax", 0.0), Ok(0.0));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = parse_number("12abc", "Amount").unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
        assert_eq!(err.field(), Some("Amount"));
        assert!(parse_number("inf", "Amount").is_err());
        assert!(parse_number("NaN", "Amount").is_err());
    }

    #[test]
    fn test_dates() {
        assert_eq!(
            parse_date("2020-02-29", "Start date"),
            Ok(NaiveDate::from_ymd_opt(2020, 2, 29))
        );
        assert!(parse_date("2021-02-29", "Start date").is_err());
        assert!(parse_date("29/02/2020", "Start date").is_err());
    }
}
