//! Profit and loss on a sale

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_finite, CalcError, Result};
use crate::format::format_fixed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOutcome {
    Profit,
    Loss,
    /// Selling price equals cost price
    Breakeven,
}

/// `percentage == amount / cost_price * 100`; both are non-negative
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitLossResult {
    pub amount: f64,
    pub percentage: f64,
    pub outcome: TradeOutcome,
}

impl fmt::Display for ProfitLossResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            TradeOutcome::Breakeven => write!(f, "No profit, no loss"),
            outcome => write!(
                f,
                "{} of {} ({}%)",
                if outcome == TradeOutcome::Profit {
                    "Profit"
                } else {
                    "Loss"
                },
                format_fixed(self.amount, 2),
                format_fixed(self.percentage, 2)
            ),
        }
    }
}

pub fn profit_or_loss(cost_price: f64, selling_price: f64) -> Result<ProfitLossResult> {
    if cost_price < 0.0 || selling_price < 0.0 {
        return Err(CalcError::invalid(
            "Cost price",
            "Cost Price and Selling Price cannot be negative.",
        ));
    }
    if cost_price == 0.0 {
        return Err(CalcError::DivisionByZero {
            field: "Cost price",
        });
    }

    let outcome = if selling_price > cost_price {
        TradeOutcome::Profit
    } else if selling_price < cost_price {
        TradeOutcome::Loss
    } else {
        TradeOutcome::Breakeven
    };
    let amount = ensure_finite(
        (selling_price - cost_price).abs(),
        "Unable to calculate profit or loss. Please check your inputs.",
    )?;
    let percentage = ensure_finite(
        amount / cost_price * 100.0,
        "Unable to calculate profit or loss. Please check your inputs.",
    )?;

    Ok(ProfitLossResult {
        amount,
        percentage,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profit() {
        let result = profit_or_loss(100.0, 150.0).unwrap();
        assert_eq!(result.outcome, TradeOutcome::Profit);
        assert_eq!(result.amount, 50.0);
        assert_eq!(result.percentage, 50.0);
        assert_eq!(result.to_string(), "Profit of 50.00 (50.00%)");
    }

    #[test]
    fn test_loss() {
        let result = profit_or_loss(150.0, 100.0).unwrap();
        assert_eq!(result.outcome, TradeOutcome::Loss);
        assert_eq!(result.amount, 50.0);
        assert!((result.percentage - 33.333_333).abs() < 1e-4);
        assert_eq!(result.to_string(), "Loss of 50.00 (33.33%)");
    }

    #[test]
    fn test_breakeven() {
        let result = profit_or_loss(80.0, 80.0).unwrap();
        assert_eq!(result.outcome, TradeOutcome::Breakeven);
        assert_eq!(result.amount, 0.0);
        assert_eq!(result.percentage, 0.0);
    }

    #[test]
    fn test_total_loss_on_zero_sale() {
        let result = profit_or_loss(80.0, 0.0).unwrap();
        assert_eq!(result.outcome, TradeOutcome::Loss);
        assert_eq!(result.percentage, 100.0);
    }

    #[test]
    fn test_tiny_cost_overflows() {
        let err = profit_or_loss(1e-320, 1.0).unwrap_err();
        assert_eq!(err.kind(), "calculation_failed");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(profit_or_loss(-1.0, 10.0).unwrap_err().kind(), "invalid_input");
        assert_eq!(profit_or_loss(10.0, -1.0).unwrap_err().kind(), "invalid_input");
        assert_eq!(
            profit_or_loss(0.0, 10.0),
            Err(CalcError::DivisionByZero {
                field: "Cost price"
            })
        );
    }
}
