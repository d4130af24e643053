//! Systematic Investment Plan growth
//!
//! Maturity = M × [(1 + r)^n − 1] × (1 + r) / r, an annuity-due: each monthly
//! installment compounds from the start of its month.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_finite, ensure_positive, Result};
use crate::format::{format_fixed, format_number};

/// `total_value == total_invested + estimated_returns`, all non-negative
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    pub total_invested: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
}

/// Split of the maturity value, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipShares {
    pub invested_percent: f64,
    pub returns_percent: f64,
}

impl Default for SipShares {
    /// Even split shown before anything is computed
    fn default() -> Self {
        Self {
            invested_percent: 50.0,
            returns_percent: 50.0,
        }
    }
}

impl SipResult {
    pub fn shares(&self) -> SipShares {
        if self.total_value <= 0.0 {
            return SipShares::default();
        }
        let invested_percent = self.total_invested / self.total_value * 100.0;
        SipShares {
            invested_percent,
            returns_percent: 100.0 - invested_percent,
        }
    }
}

impl fmt::Display for SipResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shares = self.shares();
        write!(
            f,
            "Invested {} ({}%), returns {} ({}%), total {}",
            format_fixed(self.total_invested, 0),
            format_number(shares.invested_percent, 1),
            format_fixed(self.estimated_returns, 0),
            format_number(shares.returns_percent, 1),
            format_fixed(self.total_value, 0)
        )
    }
}

pub fn compute_sip(monthly_investment: f64, annual_rate_percent: f64, years: f64) -> Result<SipResult> {
    let investment = ensure_positive(
        monthly_investment,
        "Monthly investment",
        "Please enter a valid monthly investment amount (greater than 0)",
    )?;
    let rate = ensure_positive(
        annual_rate_percent,
        "Expected return rate",
        "Please enter a valid annual interest rate (greater than 0)",
    )?;
    let years = ensure_positive(
        years,
        "Investment period",
        "Please enter a valid investment period (greater than 0)",
    )?;

    let monthly_rate = rate / 12.0 / 100.0;
    let months = years * 12.0;

    // (1 + r)^n - 1 without cancellation for small r
    let growth = (months * monthly_rate.ln_1p()).exp_m1();
    let maturity = ensure_finite(
        investment * growth * (1.0 + monthly_rate) / monthly_rate,
        "Error in calculation. Please check your inputs.",
    )?;

    let total_invested = ensure_finite(
        investment * months,
        "Error in calculation. Please check your inputs.",
    )?;
    let estimated_returns = (maturity - total_invested).max(0.0);

    Ok(SipResult {
        total_invested,
        estimated_returns,
        total_value: total_invested + estimated_returns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_year_plan() {
        let result = compute_sip(5000.0, 12.0, 10.0).unwrap();
        assert_eq!(result.total_invested, 600_000.0);
        // 5000 × [(1.01^120 − 1) × 1.01] / 0.01
        assert!((result.total_value - 1_161_695.38).abs() < 0.5);
        assert_eq!(
            result.total_value,
            result.total_invested + result.estimated_returns
        );
    }

    #[test]
    fn test_tiny_rate_never_loses_money() {
        let result = compute_sip(1000.0, 1e-12, 30.0).unwrap();
        assert!(result.estimated_returns >= 0.0);
        assert!((result.total_value - result.total_invested).abs() < 1e-3);
    }

    #[test]
    fn test_shares() {
        let result = compute_sip(5000.0, 12.0, 10.0).unwrap();
        let shares = result.shares();
        assert!((shares.invested_percent + shares.returns_percent - 100.0).abs() < 1e-9);
        assert!(shares.invested_percent > 50.0);
        assert_eq!(SipShares::default().invested_percent, 50.0);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            compute_sip(0.0, 12.0, 10.0).unwrap_err().field(),
            Some("Monthly investment")
        );
        assert_eq!(
            compute_sip(100.0, -1.0, 10.0).unwrap_err().field(),
            Some("Expected return rate")
        );
        assert_eq!(
            compute_sip(100.0, 12.0, 0.0).unwrap_err().field(),
            Some("Investment period")
        );
    }

    #[test]
    fn test_overflow_fails() {
        let err = compute_sip(1000.0, 1e6, 1e6).unwrap_err();
        assert_eq!(err.kind(), "calculation_failed");
    }
}
