//! Request evaluation
//!
//! Front ends forward raw field contents as a [`Request`]; evaluation parses
//! them, decides whether enough input is present, and dispatches to the
//! matching calculator.

mod request;

pub use request::{RawInput, Request, CALCULATORS};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::calculators::bmi::{self, BmiResult, UnitSystem};
use crate::calculators::conversion::{Conversion, ConversionResult};
use crate::calculators::dates::{self, AgeResult};
use crate::calculators::discount::{self, DiscountResult};
use crate::calculators::gst::{self, TaxResult};
use crate::calculators::loan::{self, LoanResult, TenureUnit};
use crate::calculators::percentage::{self, ChangeResult};
use crate::calculators::profit_loss::{self, ProfitLossResult};
use crate::calculators::sip::{self, SipResult, SipShares};
use crate::error::{CalcError, Result};
use crate::format::format_number;
use crate::input::{parse_date, parse_number, parse_number_or};
use crate::types::{Calculation, Unit};

/// A plain computed percentage or quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentResult {
    pub value: f64,
}

/// Result record of any calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum Response {
    PercentOf(PercentResult),
    WhatPercent(PercentResult),
    PercentChange(ChangeResult),
    ProfitLoss(ProfitLossResult),
    Discount(DiscountResult),
    AddGst(TaxResult),
    RemoveGst(TaxResult),
    Loan(LoanResult),
    Sip {
        #[serde(flatten)]
        result: SipResult,
        shares: SipShares,
    },
    Bmi {
        #[serde(flatten)]
        result: BmiResult,
        label: &'static str,
        risk_description: &'static str,
        advice: &'static str,
    },
    Convert(ConversionResult),
    DateDifference(AgeResult),
    Age {
        name: Option<String>,
        #[serde(flatten)]
        age: AgeResult,
    },
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::PercentOf(r) => write!(f, "{}", format_number(r.value, 4)),
            Response::WhatPercent(r) => write!(f, "{}%", format_number(r.value, 2)),
            Response::PercentChange(r) => write!(f, "{r}"),
            Response::ProfitLoss(r) => write!(f, "{r}"),
            Response::Discount(r) => write!(f, "{r}"),
            Response::AddGst(r) | Response::RemoveGst(r) => write!(f, "{r}"),
            Response::Loan(r) => write!(f, "{r}"),
            Response::Sip { result, .. } => write!(f, "{result}"),
            Response::Bmi { result, .. } => write!(f, "{result}"),
            Response::Convert(r) => write!(f, "{r}"),
            Response::DateDifference(r) => write!(f, "{r}"),
            Response::Age { name, age } => write!(
                f,
                "{} ({} days)",
                age.describe(name.as_deref()),
                age.total_days
            ),
        }
    }
}

/// Evaluates requests against a calendar date for age calculations
#[derive(Debug, Clone, Default)]
pub struct Engine {
    today: Option<NaiveDate>,
}

impl Engine {
    /// Engine using the local calendar date
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a fixed "today" (for reproducible ages)
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Evaluate a request into its tri-state outcome
    pub fn evaluate(&self, request: &Request) -> Calculation<Response> {
        match self.run(request) {
            Ok(Some(response)) => Calculation::Ready(response),
            Ok(None) => Calculation::Unset,
            Err(err) => Calculation::Failed(err),
        }
    }

    /// `Ok(None)` when a required field is still blank
    fn run(&self, request: &Request) -> Result<Option<Response>> {
        let response = match request {
            Request::PercentOf { percent, value } => {
                let (Some(percent), Some(value)) =
                    (number(percent, "Percent")?, number(value, "Value")?)
                else {
                    return Ok(None);
                };
                Response::PercentOf(PercentResult {
                    value: percentage::percent_of(percent, value)?,
                })
            }

            Request::WhatPercent { part, whole } => {
                let (Some(part), Some(whole)) = (number(part, "Part")?, number(whole, "Whole")?)
                else {
                    return Ok(None);
                };
                Response::WhatPercent(PercentResult {
                    value: percentage::what_percent(part, whole)?,
                })
            }

            Request::PercentChange { from, to } => {
                let (Some(from), Some(to)) =
                    (number(from, "Starting value")?, number(to, "Final value")?)
                else {
                    return Ok(None);
                };
                Response::PercentChange(percentage::percent_change(from, to)?)
            }

            Request::ProfitLoss {
                cost_price,
                selling_price,
            } => {
                let (Some(cost), Some(selling)) = (
                    number(cost_price, "Cost price")?,
                    number(selling_price, "Selling price")?,
                ) else {
                    return Ok(None);
                };
                Response::ProfitLoss(profit_loss::profit_or_loss(cost, selling)?)
            }

            Request::Discount {
                original_price,
                discount_percent,
                tax_percent,
            } => {
                let (Some(price), Some(discount_pct)) = (
                    number(original_price, "Original price")?,
                    number(discount_percent, "Discount percentage")?,
                ) else {
                    return Ok(None);
                };
                let tax = parse_number_or(tax_percent.as_str(), "Tax percentage", 0.0)?;
                Response::Discount(discount::apply_discount(price, discount_pct, tax)?)
            }

            Request::AddGst { amount, rate } => {
                let Some((amount, rate)) = gst_inputs(amount, rate)? else {
                    return Ok(None);
                };
                Response::AddGst(gst::add_tax(amount, rate)?)
            }

            Request::RemoveGst { amount, rate } => {
                let Some((amount, rate)) = gst_inputs(amount, rate)? else {
                    return Ok(None);
                };
                Response::RemoveGst(gst::remove_tax(amount, rate)?)
            }

            Request::Loan {
                principal,
                annual_rate,
                tenure,
                tenure_unit,
            } => {
                let (Some(principal), Some(rate), Some(tenure)) = (
                    number(principal, "Loan amount")?,
                    number(annual_rate, "Interest rate")?,
                    number(tenure, "Loan tenure")?,
                ) else {
                    return Ok(None);
                };
                let tenure_unit = choice(tenure_unit, "Tenure unit", TenureUnit::parse)?;
                Response::Loan(loan::compute_emi(principal, rate, tenure, tenure_unit)?)
            }

            Request::Sip {
                monthly_investment,
                annual_rate,
                years,
            } => {
                let (Some(investment), Some(rate), Some(years)) = (
                    number(monthly_investment, "Monthly investment")?,
                    number(annual_rate, "Expected return rate")?,
                    number(years, "Investment period")?,
                ) else {
                    return Ok(None);
                };
                let result = sip::compute_sip(investment, rate, years)?;
                Response::Sip {
                    shares: result.shares(),
                    result,
                }
            }

            Request::Bmi {
                weight,
                height,
                unit_system,
            } => {
                let (Some(weight), Some(height)) =
                    (number(weight, "Weight")?, number(height, "Height")?)
                else {
                    return Ok(None);
                };
                let unit_system = choice(unit_system, "Unit system", UnitSystem::parse)?;
                let result = bmi::compute_bmi(weight, height, unit_system)?;
                let def = result.category.def();
                Response::Bmi {
                    result,
                    label: def.label,
                    risk_description: def.risk_description,
                    advice: def.advice,
                }
            }

            Request::Convert { value, from, to } => {
                let (Some(value), Some(from), Some(to)) = (
                    number(value, "Value")?,
                    unit(from, "From unit")?,
                    unit(to, "To unit")?,
                ) else {
                    return Ok(None);
                };
                Response::Convert(Conversion::new(value, from, to).run()?)
            }

            Request::DateDifference { start, end } => {
                let (Some(start), Some(end)) = (
                    parse_date(start.as_str(), "Start date")?,
                    parse_date(end.as_str(), "End date")?,
                ) else {
                    return Ok(None);
                };
                Response::DateDifference(dates::date_difference(start, end))
            }

            // Unparseable or future birth dates leave the result unset
            Request::Age { birth_date, name } => {
                let Ok(Some(birth)) = parse_date(birth_date.as_str(), "Birth date") else {
                    return Ok(None);
                };
                let Some(age) = dates::age_on(birth, self.today()) else {
                    return Ok(None);
                };
                Response::Age {
                    name: name.clone().filter(|n| !n.trim().is_empty()),
                    age,
                }
            }
        };

        Ok(Some(response))
    }
}

/// Evaluate a request against the local calendar date
pub fn evaluate(request: &Request) -> Calculation<Response> {
    Engine::new().evaluate(request)
}

fn number(raw: &RawInput, field: &'static str) -> Result<Option<f64>> {
    parse_number(raw.as_str(), field)
}

fn unit(raw: &RawInput, field: &'static str) -> Result<Option<Unit>> {
    let trimmed = raw.as_str().trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<Unit>()
        .map(Some)
        .map_err(|message| CalcError::invalid(field, message))
}

/// Selector field such as a tenure unit; blank picks the default
fn choice<T: Default>(
    raw: &RawInput,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T> {
    if raw.is_blank() {
        return Ok(T::default());
    }
    let trimmed = raw.as_str().trim();
    parse(trimmed).ok_or_else(|| {
        CalcError::invalid(field, format!("Unknown {}: {trimmed}", field.to_lowercase()))
    })
}

/// Blank or zero amount/rate means the GST result is not computed yet.
/// A negative amount is rejected whatever the rate.
fn gst_inputs(amount: &RawInput, rate: &RawInput) -> Result<Option<(f64, f64)>> {
    let amount = number(amount, "Amount")?;
    if amount.is_some_and(|a| a < 0.0) {
        return Err(CalcError::invalid("Amount", "Amount cannot be negative."));
    }
    let amount = amount.filter(|a| *a != 0.0);
    let rate = number(rate, "GST rate")?.filter(|r| *r != 0.0);
    Ok(amount.zip(rate))
}
