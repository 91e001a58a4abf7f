//! Orders
//!
//! Order total assembly and the order/payment status lifecycles.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    coupons::{Coupon, CouponRejection},
    discounts::DiscountError,
    items::{LineItem, ProductRef},
    pricing::{PricingError, subtotal},
    shipping::{ShippingAddress, ShippingError, ShippingMethod, ShippingRates},
};

/// Errors raised while assembling order totals.
#[derive(Debug, Error)]
pub enum OrderTotalsError {
    /// An order needs at least one line item.
    #[error("order has no line items")]
    NoItems,

    /// The supplied coupon cannot be applied.
    #[error("coupon rejected: {0}")]
    CouponRejected(CouponRejection),

    /// Line items could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Coupon discount could not be calculated.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Shipping could not be calculated.
    #[error(transparent)]
    Shipping(#[from] ShippingError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The assembled totals broke a pricing invariant.
    #[error("order totals invariant violated: {0}")]
    InvariantViolated(&'static str),
}

/// Discount applied to an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderDiscount<'a> {
    /// Amount taken off the subtotal
    pub amount: Money<'a, Currency>,

    /// Coupon percentage points, `0` for fixed coupons or no coupon
    pub percentage: u16,
}

impl<'a> OrderDiscount<'a> {
    /// No discount.
    pub fn none(currency: &'a Currency) -> Self {
        Self {
            amount: Money::from_minor(0, currency),
            percentage: 0,
        }
    }
}

/// Computed order totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals<'a> {
    /// Sum of line totals
    pub subtotal: Money<'a, Currency>,

    /// Coupon discount
    pub discount: OrderDiscount<'a>,

    /// Shipping cost
    pub shipping_cost: Money<'a, Currency>,

    /// Amount payable
    pub total: Money<'a, Currency>,
}

impl<'a> OrderTotals<'a> {
    /// Assemble the totals for an order.
    ///
    /// Subtotal is the sum of line totals in the rate table's currency. A
    /// supplied coupon must pass [`Coupon::check_validity`]; one whose minimum
    /// or scope the order misses discounts nothing. Shipping is charged on the
    /// discounted amount and added on top.
    ///
    /// # Errors
    ///
    /// - [`OrderTotalsError::NoItems`]: `items` is empty.
    /// - [`OrderTotalsError::CouponRejected`]: the coupon is inactive, outside
    ///   its window or used up.
    /// - [`OrderTotalsError::InvariantViolated`]: the result is inconsistent.
    /// - Wrapped pricing, discount, shipping and money errors.
    pub fn assemble(
        items: &[LineItem<'a>],
        coupon: Option<&Coupon<'a>>,
        rates: &ShippingRates<'a>,
        method: ShippingMethod,
        address: &ShippingAddress,
        now: Timestamp,
    ) -> Result<Self, OrderTotalsError> {
        if items.is_empty() {
            return Err(OrderTotalsError::NoItems);
        }

        let currency = rates.currency();
        let subtotal = subtotal(items, currency)?;

        let discount = match coupon {
            Some(coupon) => {
                let products: SmallVec<[ProductRef; 8]> =
                    items.iter().map(LineItem::product).collect();

                coupon
                    .check_validity(now)
                    .map_err(OrderTotalsError::CouponRejected)?;

                let amount = coupon.calculate_discount(subtotal, &products, now)?;
                let percentage = if amount.is_zero() {
                    0
                } else {
                    coupon.percentage_points()
                };

                OrderDiscount { amount, percentage }
            }
            None => OrderDiscount::none(currency),
        };

        let discounted = subtotal.sub(discount.amount)?;
        let shipping_cost = rates.calculate_shipping_cost(method, address, &discounted)?;
        let total = discounted.add(shipping_cost)?;

        let totals = Self {
            subtotal,
            discount,
            shipping_cost,
            total,
        };

        totals.verify(coupon)?;

        Ok(totals)
    }

    /// Check the totals are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`OrderTotalsError::InvariantViolated`] naming the broken rule.
    pub fn verify(&self, coupon: Option<&Coupon<'a>>) -> Result<(), OrderTotalsError> {
        let subtotal = self.subtotal.to_minor_units();
        let discount = self.discount.amount.to_minor_units();
        let shipping = self.shipping_cost.to_minor_units();
        let total = self.total.to_minor_units();

        if discount < 0 {
            return Err(OrderTotalsError::InvariantViolated("negative discount"));
        }

        if discount > subtotal {
            return Err(OrderTotalsError::InvariantViolated("discount exceeds subtotal"));
        }

        if let Some(cap) = coupon.and_then(Coupon::max_discount)
            && cap.to_minor_units() > 0
            && discount > cap.to_minor_units()
        {
            return Err(OrderTotalsError::InvariantViolated("discount exceeds coupon cap"));
        }

        if shipping < 0 || total < 0 {
            return Err(OrderTotalsError::InvariantViolated("negative total"));
        }

        if subtotal.checked_sub(discount).and_then(|v| v.checked_add(shipping)) != Some(total) {
            return Err(OrderTotalsError::InvariantViolated(
                "total is not subtotal minus discount plus shipping",
            ));
        }

        Ok(())
    }
}

/// Raised when a status string is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown status {0:?}")]
pub struct StatusParseError(pub String);

/// Order fulfilment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, not yet picked up
    #[default]
    Pending,

    /// Being prepared
    Processing,

    /// Handed to the carrier
    Shipped,

    /// Received by the customer
    Delivered,

    /// Cancelled before shipping
    Cancelled,
}

impl OrderStatus {
    /// Stable identifier for storage and API responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are allowed.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether an order may move from this status to `next`.
    ///
    /// Orders move forward one step at a time and may be cancelled until
    /// they ship.
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing | Self::Cancelled)
                | (Self::Processing, Self::Shipped | Self::Cancelled)
                | (Self::Shipped, Self::Delivered)
        )
    }
}

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting payment
    #[default]
    Pending,

    /// Payment captured
    Paid,

    /// Payment attempt failed
    Failed,
}

impl PaymentStatus {
    /// Stable identifier for storage and API responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }

    /// Whether no further transitions are allowed.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid)
    }

    /// Whether payment may move from this status to `next`.
    ///
    /// A failed payment may be retried.
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Paid | Self::Failed) | (Self::Failed, Self::Paid)
        )
    }
}

impl FromStr for PaymentStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
