//! Goods and Services Tax: adding tax to a net amount or extracting it from a gross one

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_finite, ensure_range, CalcError, Result};

const OVERFLOW: &str = "Unable to calculate GST. Please check your inputs.";
use crate::format::format_fixed;

/// Preset GST slab
pub struct GstRateDef {
    pub rate: f64,
    pub label: &'static str,
}

/// Standard slabs offered by the rate selector
pub static GST_RATES: &[GstRateDef] = &[
    GstRateDef {
        rate: 5.0,
        label: "5%",
    },
    GstRateDef {
        rate: 12.0,
        label: "12%",
    },
    GstRateDef {
        rate: 18.0,
        label: "18%",
    },
    GstRateDef {
        rate: 28.0,
        label: "28%",
    },
];

/// Rate preselected when none is given
pub const DEFAULT_GST_RATE: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxMode {
    /// Amount excluded tax; result amount is the gross total
    Add,
    /// Amount included tax; result amount is the net base
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub mode: TaxMode,
    pub tax_amount: f64,
    /// Gross total for [`TaxMode::Add`], net base for [`TaxMode::Remove`]
    pub gross_or_net_amount: f64,
}

impl fmt::Display for TaxResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.mode {
            TaxMode::Add => "total",
            TaxMode::Remove => "base amount",
        };
        write!(
            f,
            "GST {}, {} {}",
            format_fixed(self.tax_amount, 2),
            label,
            format_fixed(self.gross_or_net_amount, 2)
        )
    }
}

fn validate(amount: f64, rate_percent: f64) -> Result<()> {
    if !(amount.is_finite() && amount >= 0.0) {
        return Err(CalcError::invalid("Amount", "Amount cannot be negative."));
    }
    ensure_range(rate_percent, "GST rate", 0.0, 100.0)?;
    Ok(())
}

/// Tax on a tax-exclusive `amount`
pub fn add_tax(amount: f64, rate_percent: f64) -> Result<TaxResult> {
    validate(amount, rate_percent)?;

    let tax = ensure_finite(amount * rate_percent / 100.0, OVERFLOW)?;
    Ok(TaxResult {
        mode: TaxMode::Add,
        tax_amount: tax,
        gross_or_net_amount: ensure_finite(amount + tax, OVERFLOW)?,
    })
}

/// Tax contained in a tax-inclusive amount: `base = inclusive / (1 + rate/100)`
pub fn remove_tax(inclusive_amount: f64, rate_percent: f64) -> Result<TaxResult> {
    validate(inclusive_amount, rate_percent)?;

    let base = ensure_finite(inclusive_amount / (1.0 + rate_percent / 100.0), OVERFLOW)?;
    Ok(TaxResult {
        mode: TaxMode::Remove,
        tax_amount: ensure_finite(inclusive_amount - base, OVERFLOW)?,
        gross_or_net_amount: base,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_add_tax() {
        let result = add_tax(100.0, 18.0).unwrap();
        assert_eq!(result.tax_amount, 18.0);
        assert_eq!(result.gross_or_net_amount, 118.0);
        assert_eq!(result.to_string(), "GST 18.00, total 118.00");
    }

    #[test]
    fn test_remove_tax() {
        let result = remove_tax(118.0, 18.0).unwrap();
        assert_close(result.tax_amount, 18.0);
        assert_close(result.gross_or_net_amount, 100.0);
        assert_eq!(result.mode, TaxMode::Remove);
    }

    #[test]
    fn test_zero_inputs_give_zero_tax() {
        let zero_amount = add_tax(0.0, 18.0).unwrap();
        assert_eq!(zero_amount.tax_amount, 0.0);
        assert_eq!(zero_amount.gross_or_net_amount, 0.0);

        let zero_rate = remove_tax(250.0, 0.0).unwrap();
        assert_eq!(zero_rate.tax_amount, 0.0);
        assert_eq!(zero_rate.gross_or_net_amount, 250.0);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(add_tax(-5.0, 18.0).unwrap_err().kind(), "invalid_input");
        assert_eq!(remove_tax(100.0, 101.0).unwrap_err().kind(), "out_of_range");
    }

    #[test]
    fn test_huge_amount_fails_instead_of_overflowing() {
        let err = add_tax(1e308, 100.0).unwrap_err();
        assert_eq!(err.kind(), "calculation_failed");
        assert!(add_tax(f64::INFINITY, 18.0).is_err());
    }

    #[test]
    fn test_presets_include_default() {
        assert!(GST_RATES.iter().any(|r| r.rate == DEFAULT_GST_RATE));
    }
}
