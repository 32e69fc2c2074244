//! Discount utilities
//!
//! Arithmetic shared by the promotion rules.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation overflowed.
    #[error("percentage conversion overflowed")]
    PercentConversion,
}

/// Calculate `percent` of `amount`.
///
/// The result is not rounded and not clamped: a negative amount yields a
/// negative discount.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the multiplication overflows.
pub fn percent_of(percent: &Percentage, amount: Decimal) -> Result<Decimal, DiscountError> {
    // decimal_percentage doesn't expose the underlying Decimal
    ((*percent) * Decimal::ONE)
        .checked_mul(amount)
        .ok_or(DiscountError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_keeps_fractional_cents() -> TestResult {
        let percent = Percentage::from(Decimal::new(15, 2));
        let result = percent_of(&percent, Decimal::new(161_50, 2))?;

        assert_eq!(result, Decimal::new(24_225, 3));

        Ok(())
    }

    #[test]
    fn percent_of_negative_amount_is_negative() -> TestResult {
        let percent = Percentage::from(Decimal::new(15, 2));
        let result = percent_of(&percent, Decimal::new(-100, 0))?;

        assert_eq!(result, Decimal::new(-15, 0));

        Ok(())
    }

    #[test]
    fn percent_of_overflow_returns_error() {
        let percent = Percentage::from(Decimal::new(2, 0));
        let result = percent_of(&percent, Decimal::MAX);

        assert_eq!(result, Err(DiscountError::PercentConversion));
    }
}
