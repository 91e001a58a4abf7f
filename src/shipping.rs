//! Shipping
//!
//! Flat-rate shipping: a base cost per [`ShippingMethod`], plus a fixed
//! surcharge when the address is outside the store's home country.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{SignedDuration, Timestamp};
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::discounts::ensure_same_currency;

/// Home country used when none is configured.
pub const DEFAULT_HOME_COUNTRY: &str = "India";

/// Default standard rate, in whole units of the store currency.
pub const DEFAULT_STANDARD_RATE: i64 = 5;

/// Default express rate, in whole units of the store currency.
pub const DEFAULT_EXPRESS_RATE: i64 = 15;

/// Default priority rate, in whole units of the store currency.
pub const DEFAULT_PRIORITY_RATE: i64 = 25;

/// Default international surcharge, in whole units of the store currency.
pub const DEFAULT_INTERNATIONAL_SURCHARGE: i64 = 20;

/// Extra transit days for international deliveries.
const INTERNATIONAL_TRANSIT_DAYS: i64 = 7;

const HOURS_PER_DAY: i64 = 24;

/// Errors raised by shipping calculations.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// Unrecognised shipping method name.
    #[error("unknown shipping method {0:?}")]
    UnknownMethod(String),

    /// Rates or order total in mismatched currencies.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Delivery estimate fell outside the representable range.
    #[error("estimated delivery date out of range")]
    DeliveryDate(#[source] jiff::Error),
}

/// Shipping method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Cheapest, slowest.
    #[default]
    Standard,

    /// Faster than standard.
    Express,

    /// Next-day.
    Priority,
}

impl ShippingMethod {
    /// Stable identifier for storage and API responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Priority => "priority",
        }
    }

    /// Domestic transit time in days.
    #[must_use]
    pub const fn transit_days(&self) -> i64 {
        match self {
            Self::Standard => 7,
            Self::Express => 3,
            Self::Priority => 1,
        }
    }
}

impl FromStr for ShippingMethod {
    type Err = ShippingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            "priority" => Ok(Self::Priority),
            other => Err(ShippingError::UnknownMethod(other.to_string())),
        }
    }
}

impl Display for ShippingMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Delivery address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient name
    #[serde(default)]
    pub name: String,

    /// Street address
    #[serde(default)]
    pub street: String,

    /// City
    #[serde(default)]
    pub city: String,

    /// State or province
    #[serde(default)]
    pub state: String,

    /// Postal code
    #[serde(default)]
    pub postal_code: String,

    /// Country name
    #[serde(default)]
    pub country: String,

    /// Contact phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ShippingAddress {
    /// Whether the address is in `home_country`.
    ///
    /// Countries compare case-insensitively; a blank country is treated as
    /// the home country.
    pub fn is_domestic(&self, home_country: &str) -> bool {
        let country = self.country.trim();

        country.is_empty() || country.eq_ignore_ascii_case(home_country.trim())
    }
}

/// Shipping cost and delivery estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingQuote<'a> {
    /// Shipping cost
    pub cost: Money<'a, Currency>,

    /// Estimated delivery instant
    pub estimated_delivery: Timestamp,
}

/// Flat shipping rate table.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingRates<'a> {
    /// Standard shipping cost
    pub standard: Money<'a, Currency>,

    /// Express shipping cost
    pub express: Money<'a, Currency>,

    /// Priority shipping cost
    pub priority: Money<'a, Currency>,

    /// Added to the base cost for international addresses
    pub international_surcharge: Money<'a, Currency>,

    /// Orders at or above this amount ship for free
    pub free_shipping_threshold: Option<Money<'a, Currency>>,

    /// Country treated as domestic
    pub home_country: String,
}

impl<'a> ShippingRates<'a> {
    /// Default rate table in `currency`.
    ///
    /// The defaults are whole currency units, so their minor-unit values
    /// follow the currency's exponent.
    #[must_use]
    pub fn with_defaults(currency: &'a Currency) -> Self {
        Self {
            standard: Money::from_major(DEFAULT_STANDARD_RATE, currency),
            express: Money::from_major(DEFAULT_EXPRESS_RATE, currency),
            priority: Money::from_major(DEFAULT_PRIORITY_RATE, currency),
            international_surcharge: Money::from_major(DEFAULT_INTERNATIONAL_SURCHARGE, currency),
            free_shipping_threshold: None,
            home_country: DEFAULT_HOME_COUNTRY.to_string(),
        }
    }

    /// Currency the rates are expressed in.
    pub fn currency(&self) -> &'a Currency {
        self.standard.currency()
    }

    /// Base cost for `method`, before any surcharge.
    pub const fn base_cost(&self, method: ShippingMethod) -> Money<'a, Currency> {
        match method {
            ShippingMethod::Standard => self.standard,
            ShippingMethod::Express => self.express,
            ShippingMethod::Priority => self.priority,
        }
    }

    /// Calculates the shipping cost for an order.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::Money`] when `order_total` or the rates are in
    /// mismatched currencies.
    pub fn calculate_shipping_cost(
        &self,
        method: ShippingMethod,
        address: &ShippingAddress,
        order_total: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, ShippingError> {
        let base = self.base_cost(method);

        ensure_same_currency(&base, order_total)?;

        if let Some(threshold) = &self.free_shipping_threshold
            && order_total.to_minor_units() >= threshold.to_minor_units()
        {
            return Ok(Money::from_minor(0, base.currency()));
        }

        if address.is_domestic(&self.home_country) {
            return Ok(base);
        }

        Ok(base.add(self.international_surcharge)?)
    }

    /// Estimates when an order shipped at `from` will arrive.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::DeliveryDate`] if the estimate overflows.
    pub fn estimated_delivery(
        &self,
        method: ShippingMethod,
        address: &ShippingAddress,
        from: Timestamp,
    ) -> Result<Timestamp, ShippingError> {
        let mut days = method.transit_days();

        if !address.is_domestic(&self.home_country) {
            days += INTERNATIONAL_TRANSIT_DAYS;
        }

        from.checked_add(SignedDuration::from_hours(days * HOURS_PER_DAY))
            .map_err(ShippingError::DeliveryDate)
    }

    /// Cost and delivery estimate together.
    ///
    /// # Errors
    ///
    /// See [`ShippingRates::calculate_shipping_cost`] and
    /// [`ShippingRates::estimated_delivery`].
    pub fn quote(
        &self,
        method: ShippingMethod,
        address: &ShippingAddress,
        order_total: &Money<'a, Currency>,
        now: Timestamp,
    ) -> Result<ShippingQuote<'a>, ShippingError> {
        Ok(ShippingQuote {
            cost: self.calculate_shipping_cost(method, address, order_total)?,
            estimated_delivery: self.estimated_delivery(method, address, now)?,
        })
    }
}
