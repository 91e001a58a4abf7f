//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while pricing line items.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Unit price multiplied by quantity does not fit in minor units.
    #[error("line total overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates unit price multiplied by quantity for a single line item.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the product does not fit in an `i64` of minor units.
pub fn line_total<'a>(item: &LineItem<'a>) -> Result<Money<'a, Currency>, PricingError> {
    let unit_price = item.unit_price();

    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(item.quantity()))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Calculates the subtotal of a list of line items.
///
/// An empty list has a zero subtotal in `currency`.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total overflowed.
/// - [`PricingError::Money`]: an item is priced in a currency other than `currency`.
pub fn subtotal<'a>(
    items: &[LineItem<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            Ok(acc.add(line_total(item)?)?)
        })
}
