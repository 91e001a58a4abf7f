//! Minor-unit amounts
//!
//! Storage and the API carry amounts as unsigned minor units; the pricing core
//! works in [`Money`].

use std::num::TryFromIntError;

use rusty_money::{Money, iso::Currency};

/// Wrap a stored amount in the store currency.
///
/// # Errors
///
/// Returns an error when `minor` does not fit in an `i64`.
pub fn to_money(minor: u64, currency: &Currency) -> Result<Money<'_, Currency>, TryFromIntError> {
    Ok(Money::from_minor(i64::try_from(minor)?, currency))
}

/// Unwrap an amount for storage.
///
/// # Errors
///
/// Returns an error when `money` is negative.
pub fn from_money(money: &Money<'_, Currency>) -> Result<u64, TryFromIntError> {
    u64::try_from(money.to_minor_units())
}
