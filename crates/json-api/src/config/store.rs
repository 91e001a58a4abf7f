//! Store Config

use clap::Args;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use storefront::shipping::{DEFAULT_HOME_COUNTRY, ShippingRates};
use thiserror::Error;

/// Errors raised while turning store settings into a rate table.
#[derive(Debug, Error)]
pub enum StoreConfigError {
    /// Currency code is not an ISO 4217 code.
    #[error("unknown store currency {0:?}")]
    UnknownCurrency(String),

    /// Amount does not fit a money value.
    #[error("{0} is out of range")]
    AmountOutOfRange(&'static str),
}

/// Store currency and shipping rate settings.
///
/// Amounts are minor units of the store currency. Unset rates fall back to
/// [`ShippingRates::with_defaults`] in that currency.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// ISO 4217 store currency
    #[arg(long, env = "STORE_CURRENCY", default_value = "INR")]
    pub currency: String,

    /// Country whose addresses ship domestically
    #[arg(long, env = "HOME_COUNTRY", default_value = DEFAULT_HOME_COUNTRY)]
    pub home_country: String,

    /// Standard shipping rate
    #[arg(long, env = "SHIPPING_STANDARD_RATE")]
    pub standard_rate: Option<u64>,

    /// Express shipping rate
    #[arg(long, env = "SHIPPING_EXPRESS_RATE")]
    pub express_rate: Option<u64>,

    /// Priority shipping rate
    #[arg(long, env = "SHIPPING_PRIORITY_RATE")]
    pub priority_rate: Option<u64>,

    /// Surcharge for addresses outside the home country
    #[arg(long, env = "SHIPPING_INTERNATIONAL_SURCHARGE")]
    pub international_surcharge: Option<u64>,

    /// Orders at or above this total ship free; unset disables free shipping
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD")]
    pub free_shipping_threshold: Option<u64>,
}

impl StoreConfig {
    /// Resolve the configured store currency.
    ///
    /// # Errors
    ///
    /// Returns [`StoreConfigError::UnknownCurrency`] for codes `rusty_money` does not know.
    pub fn currency(&self) -> Result<&'static Currency, StoreConfigError> {
        iso::find(&self.currency.trim().to_ascii_uppercase())
            .ok_or_else(|| StoreConfigError::UnknownCurrency(self.currency.clone()))
    }

    /// Build the shipping rate table.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown currency or an amount above `i64::MAX`.
    pub fn shipping_rates(&self) -> Result<ShippingRates<'static>, StoreConfigError> {
        let currency = self.currency()?;
        let defaults = ShippingRates::with_defaults(currency);

        let money = |amount: u64, name: &'static str| {
            i64::try_from(amount)
                .map(|minor| Money::from_minor(minor, currency))
                .map_err(|_overflow| StoreConfigError::AmountOutOfRange(name))
        };

        let rate = |amount: Option<u64>, default, name| {
            amount.map_or(Ok(default), |amount| money(amount, name))
        };

        Ok(ShippingRates {
            standard: rate(self.standard_rate, defaults.standard, "standard rate")?,
            express: rate(self.express_rate, defaults.express, "express rate")?,
            priority: rate(self.priority_rate, defaults.priority, "priority rate")?,
            international_surcharge: rate(
                self.international_surcharge,
                defaults.international_surcharge,
                "international surcharge",
            )?,
            free_shipping_threshold: self
                .free_shipping_threshold
                .map(|threshold| money(threshold, "free shipping threshold"))
                .transpose()?,
            home_country: self.home_country.clone(),
        })
    }
}
