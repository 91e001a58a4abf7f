//! Discounts
//!
//! Money helpers shared by coupon and order calculations.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Converts whole percent points (e.g. `20` for 20%) into a fractional percentage.
pub fn percentage_from_points(points: u16) -> Percentage {
    Percentage::from(Decimal::from(points) / Decimal::ONE_HUNDRED)
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// Rounds half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] when the result cannot be represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // the percentage type does not expose its inner Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Calculate `percent` of `amount`.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] when the result cannot be represented.
pub fn percent_of<'a>(
    amount: Money<'a, Currency>,
    percent: &Percentage,
) -> Result<Money<'a, Currency>, DiscountError> {
    let minor = percent_of_minor(percent, amount.to_minor_units())?;

    Ok(Money::from_minor(minor, amount.currency()))
}

/// Return the smaller of two amounts.
///
/// # Errors
///
/// Returns [`MoneyError::CurrencyMismatch`] when the amounts are in different currencies.
pub fn min_money<'a>(
    a: Money<'a, Currency>,
    b: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, MoneyError> {
    ensure_same_currency(&a, &b)?;

    if b.to_minor_units() < a.to_minor_units() {
        Ok(b)
    } else {
        Ok(a)
    }
}

/// Fail unless both amounts share a currency.
///
/// # Errors
///
/// Returns [`MoneyError::CurrencyMismatch`] when the currencies differ.
pub fn ensure_same_currency(
    expected: &Money<'_, Currency>,
    actual: &Money<'_, Currency>,
) -> Result<(), MoneyError> {
    if expected.currency() == actual.currency() {
        return Ok(());
    }

    Err(MoneyError::CurrencyMismatch {
        expected: expected.currency().iso_alpha_code,
        actual: actual.currency().iso_alpha_code,
    })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, INR};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percentage_from_points_is_fractional() -> TestResult {
        let percent = percentage_from_points(25);

        assert_eq!(percent_of_minor(&percent, 1000)?, 250);

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        let percent = percentage_from_points(15);

        // 15% of 1_010 is 151.5
        assert_eq!(percent_of_minor(&percent, 1010)?, 152);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn percent_of_keeps_currency() -> TestResult {
        let discount = percent_of(Money::from_minor(100_000, INR), &percentage_from_points(20))?;

        assert_eq!(discount, Money::from_minor(20_000, INR));

        Ok(())
    }

    #[test]
    fn min_money_picks_smaller_amount() -> TestResult {
        let small = Money::from_minor(100, INR);
        let large = Money::from_minor(900, INR);

        assert_eq!(min_money(small, large)?, small);
        assert_eq!(min_money(large, small)?, small);

        Ok(())
    }

    #[test]
    fn min_money_rejects_currency_mismatch() {
        let result = min_money(Money::from_minor(100, INR), Money::from_minor(100, GBP));

        assert_eq!(
            result,
            Err(MoneyError::CurrencyMismatch {
                expected: INR.iso_alpha_code,
                actual: GBP.iso_alpha_code,
            })
        );
    }
}
