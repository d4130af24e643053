//! calckit-core: Calculation engine for calckit
//!
//! This crate holds the pure logic behind the calckit calculators:
//! percentages, profit and loss, discounts, GST, loan EMI, SIP growth, BMI,
//! unit conversion and calendar differences. It has no UI dependencies and
//! can be used from the CLI, a JSON-RPC server, or WASM.
//!
//! # Example
//!
//! ```
//! use calckit_core::{evaluate, percent_change, Calculation, RawInput, Request};
//!
//! // Typed calculators
//! let change = percent_change(100.0, 120.0).unwrap();
//! assert_eq!(change.to_string(), "20% increase");
//!
//! // Raw field contents, as typed by a user
//! let request = Request::WhatPercent {
//!     part: RawInput::from("30"),
//!     whole: RawInput::from(""),
//! };
//! assert!(matches!(evaluate(&request), Calculation::Unset));
//! ```

pub mod calculators;
pub mod error;
pub mod eval;
pub mod format;
pub mod input;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use calculators::bmi::{compute_bmi, BmiCategory, BmiResult, RiskLevel, UnitSystem};
pub use calculators::conversion::{convert, Conversion, ConversionResult};
pub use calculators::dates::{age_from_birth_date, age_on, date_difference, AgeResult};
pub use calculators::discount::{apply_discount, DiscountResult};
pub use calculators::gst::{add_tax, remove_tax, TaxMode, TaxResult, DEFAULT_GST_RATE, GST_RATES};
pub use calculators::loan::{compute_emi, LoanResult, TenureUnit};
pub use calculators::percentage::{percent_change, percent_of, what_percent, ChangeResult, Direction};
pub use calculators::profit_loss::{profit_or_loss, ProfitLossResult, TradeOutcome};
pub use calculators::sip::{compute_sip, SipResult, SipShares};
pub use error::{CalcError, Result};
pub use eval::{evaluate, Engine, RawInput, Request, Response, CALCULATORS};
pub use types::{Calculation, Unit, UnitCategory, UnitDef, UNITS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_is_pure() {
        let request = Request::Sip {
            monthly_investment: RawInput::from("5000"),
            annual_rate: RawInput::from("12"),
            years: RawInput::from("10"),
        };
        let engine = Engine::new();
        assert_eq!(engine.evaluate(&request), engine.evaluate(&request));
    }

    #[test]
    fn test_every_calculator_has_a_name() {
        assert_eq!(CALCULATORS.len(), 13);
    }
}
