//! Discounted price with optional sales tax

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_finite, ensure_positive, ensure_range, Result};

const OVERFLOW: &str = "Unable to calculate the discount. Please check your inputs.";
use crate::format::format_fixed;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountResult {
    pub discount_amount: f64,
    pub final_price: f64,
    /// `final_price` with the tax percentage applied on top
    pub final_price_with_tax: f64,
}

impl fmt::Display for DiscountResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You save {}, final price {}",
            format_fixed(self.discount_amount, 2),
            format_fixed(self.final_price, 2)
        )?;
        if self.final_price_with_tax != self.final_price {
            write!(f, " ({} with tax)", format_fixed(self.final_price_with_tax, 2))?;
        }
        Ok(())
    }
}

/// Apply `discount_percent` to `original_price`, then `tax_percent` to the result.
/// Pass `0.0` for no tax.
pub fn apply_discount(
    original_price: f64,
    discount_percent: f64,
    tax_percent: f64,
) -> Result<DiscountResult> {
    let price = ensure_positive(
        original_price,
        "Original price",
        "Original price must be greater than zero.",
    )?;
    let discount = ensure_range(discount_percent, "Discount percentage", 0.0, 100.0)?;
    let tax = ensure_range(tax_percent, "Tax percentage", 0.0, 100.0)?;

    let discount_amount = ensure_finite(price * discount / 100.0, OVERFLOW)?;
    let final_price = price - discount_amount;
    let final_price_with_tax = ensure_finite(final_price + final_price * tax / 100.0, OVERFLOW)?;

    Ok(DiscountResult {
        discount_amount,
        final_price,
        final_price_with_tax,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    #[test]
    fn test_discount_with_tax() {
        let result = apply_discount(1000.0, 20.0, 18.0).unwrap();
        assert_eq!(result.discount_amount, 200.0);
        assert_eq!(result.final_price, 800.0);
        assert_eq!(result.final_price_with_tax, 944.0);
        assert_eq!(
            result.to_string(),
            "You save 200.00, final price 800.00 (944.00 with tax)"
        );
    }

    #[test]
    fn test_discount_without_tax() {
        let result = apply_discount(250.0, 10.0, 0.0).unwrap();
        assert_eq!(result.final_price, 225.0);
        assert_eq!(result.final_price_with_tax, 225.0);
        assert_eq!(result.to_string(), "You save 25.00, final price 225.00");
    }

    #[test]
    fn test_full_discount() {
        let result = apply_discount(99.0, 100.0, 5.0).unwrap();
        assert_eq!(result.final_price, 0.0);
        assert_eq!(result.final_price_with_tax, 0.0);
    }

    #[test]
    fn test_huge_price_fails_instead_of_overflowing() {
        let err = apply_discount(1e308, 20.0, 0.0).unwrap_err();
        assert_eq!(err.kind(), "calculation_failed");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            apply_discount(0.0, 10.0, 0.0).unwrap_err().kind(),
            "invalid_input"
        );
        assert_eq!(
            apply_discount(100.0, 120.0, 0.0),
            Err(CalcError::OutOfRange {
                field: "Discount percentage",
                min: 0.0,
                max: 100.0
            })
        );
        assert_eq!(
            apply_discount(100.0, 10.0, -1.0).unwrap_err().field(),
            Some("Tax percentage")
        );
    }
}
