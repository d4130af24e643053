//! Amortizing loan EMI (Equated Monthly Installment)
//!
//! EMI = P × r × (1 + r)^n / [(1 + r)^n − 1]
//!
//! where P is the principal, r the monthly rate (annual / 12 / 100) and n the
//! tenure in months.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_finite, ensure_positive, CalcError, Result};
use crate::format::format_fixed;

const POSITIVE_INPUTS: &str = "All values must be greater than zero.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenureUnit {
    #[default]
    Years,
    Months,
}

impl TenureUnit {
    pub fn parse(s: &str) -> Option<TenureUnit> {
        match s.trim().to_lowercase().as_str() {
            "years" | "year" | "y" => Some(TenureUnit::Years),
            "months" | "month" | "m" => Some(TenureUnit::Months),
            _ => None,
        }
    }
}

/// Validated loan parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
}

impl LoanTerms {
    /// Validate raw inputs and normalize the tenure to whole months.
    /// Year tenures round to the nearest month; month tenures must be whole.
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        tenure: f64,
        unit: TenureUnit,
    ) -> Result<Self> {
        let principal = ensure_positive(principal, "Loan amount", POSITIVE_INPUTS)?;
        let annual_rate_percent =
            ensure_positive(annual_rate_percent, "Interest rate", POSITIVE_INPUTS)?;
        let tenure = ensure_positive(tenure, "Loan tenure", POSITIVE_INPUTS)?;

        let months = match unit {
            TenureUnit::Years => (tenure * 12.0).round(),
            TenureUnit::Months if tenure.fract() != 0.0 => {
                return Err(CalcError::invalid(
                    "Loan tenure",
                    "Loan tenure in months must be a whole number.",
                ));
            }
            TenureUnit::Months => tenure,
        };
        if months < 1.0 {
            return Err(CalcError::invalid(
                "Loan tenure",
                "Loan tenure must be at least one month.",
            ));
        }
        if months > f64::from(u32::MAX) {
            return Err(CalcError::invalid("Loan tenure", "Loan tenure is too long."));
        }

        Ok(Self {
            principal,
            annual_rate_percent,
            tenure_months: months as u32,
        })
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }
}

/// `total_payment == monthly_payment * tenure_months`,
/// `total_interest == total_payment - principal`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub tenure_months: u32,
    /// Periodic rate used in the formula (decimal, not percent)
    pub monthly_rate: f64,
}

impl fmt::Display for LoanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EMI {} for {} months, total {}, interest {}",
            format_fixed(self.monthly_payment, 2),
            self.tenure_months,
            format_fixed(self.total_payment, 2),
            format_fixed(self.total_interest, 2)
        )
    }
}

/// EMI for already validated terms
pub fn emi_for(terms: &LoanTerms) -> Result<LoanResult> {
    let rate = terms.monthly_rate();
    let months = f64::from(terms.tenure_months);
    let growth = (1.0 + rate).powf(months);

    let emi = ensure_finite(
        terms.principal * rate * growth / (growth - 1.0),
        "Unable to calculate EMI. Please check your inputs.",
    )?;
    let total_payment = emi * months;

    Ok(LoanResult {
        monthly_payment: emi,
        total_payment,
        total_interest: total_payment - terms.principal,
        tenure_months: terms.tenure_months,
        monthly_rate: rate,
    })
}

pub fn compute_emi(
    principal: f64,
    annual_rate_percent: f64,
    tenure: f64,
    tenure_unit: TenureUnit,
) -> Result<LoanResult> {
    let terms = LoanTerms::new(principal, annual_rate_percent, tenure, tenure_unit)?;
    emi_for(&terms)
}
