//! Coupons
//!
//! A coupon is a discount code with a validity window, a usage cap, an
//! optional minimum order amount and an optional product/category scope.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    discounts::{DiscountError, ensure_same_currency, min_money, percent_of, percentage_from_points},
    items::ProductRef,
};

pub mod code;
pub mod scope;
pub mod validity;

pub use code::{CouponCode, CouponCodeError};
pub use scope::CouponScope;
pub use validity::{UsageLimit, ValidityWindow};

/// Errors raised while constructing or redeeming a coupon.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    /// Percentage must be in `1..=100`.
    #[error("percentage must be between 1 and 100, got {0}")]
    InvalidPercentage(u16),

    /// Fixed amounts cannot be negative.
    #[error("coupon amount cannot be negative")]
    NegativeAmount,

    /// Validity window ends before it starts.
    #[error("coupon validity window ends before it starts")]
    InvalidWindow,

    /// No redemptions remain.
    #[error("coupon usage limit has been reached")]
    UsageExhausted,
}

/// Why a coupon cannot be applied to an order.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CouponRejection {
    /// Coupon has been switched off.
    #[error("coupon is not active")]
    Inactive,

    /// Validity window has not opened yet.
    #[error("coupon is not valid yet")]
    NotYetValid,

    /// Validity window has closed.
    #[error("coupon has expired")]
    Expired,

    /// Usage limit reached.
    #[error("coupon usage limit has been reached")]
    UsageExhausted,

    /// Order total is below the coupon minimum.
    #[error("order total is below the coupon minimum")]
    MinimumNotMet,

    /// Scope matches no product in the order.
    #[error("coupon does not apply to any product in the order")]
    NotApplicable,
}

impl CouponRejection {
    /// Stable identifier for API responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::NotYetValid => "not_yet_valid",
            Self::Expired => "expired",
            Self::UsageExhausted => "usage_exhausted",
            Self::MinimumNotMet => "minimum_not_met",
            Self::NotApplicable => "not_applicable",
        }
    }

    /// Whether the rejection depends on the order rather than the coupon.
    ///
    /// Such a coupon is still redeemable, just not against this order.
    #[must_use]
    pub const fn is_order_specific(&self) -> bool {
        matches!(self, Self::MinimumNotMet | Self::NotApplicable)
    }
}

/// How a coupon discounts an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CouponKind<'a> {
    /// Whole percent points off the order total (e.g. `20` for 20%).
    PercentageOff {
        /// Percent points in `1..=100`
        points: u16,
    },

    /// A fixed amount off the order total.
    AmountOff(Money<'a, Currency>),
}

impl CouponKind<'_> {
    /// Stable identifier for storage and API responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PercentageOff { .. } => "percentage",
            Self::AmountOff(_) => "fixed",
        }
    }
}

/// Coupon
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon<'a> {
    code: CouponCode,
    kind: CouponKind<'a>,
    min_order_amount: Option<Money<'a, Currency>>,
    max_discount: Option<Money<'a, Currency>>,
    validity: ValidityWindow,
    usage: UsageLimit,
    scope: CouponScope,
    active: bool,
}

impl<'a> Coupon<'a> {
    /// Create an active, unrestricted coupon.
    ///
    /// # Errors
    ///
    /// - [`CouponError::InvalidPercentage`] for percentages outside `1..=100`.
    /// - [`CouponError::NegativeAmount`] for negative fixed amounts.
    /// - [`CouponError::InvalidWindow`] when `validity.until` precedes `validity.from`.
    pub fn new(
        code: CouponCode,
        kind: CouponKind<'a>,
        validity: ValidityWindow,
        usage: UsageLimit,
    ) -> Result<Self, CouponError> {
        match kind {
            CouponKind::PercentageOff { points } if points == 0 || points > 100 => {
                return Err(CouponError::InvalidPercentage(points));
            }
            CouponKind::AmountOff(amount) if amount.to_minor_units() < 0 => {
                return Err(CouponError::NegativeAmount);
            }
            CouponKind::PercentageOff { .. } | CouponKind::AmountOff(_) => {}
        }

        if validity.until < validity.from {
            return Err(CouponError::InvalidWindow);
        }

        Ok(Self {
            code,
            kind,
            min_order_amount: None,
            max_discount: None,
            validity,
            usage,
            scope: CouponScope::unrestricted(),
            active: true,
        })
    }

    /// Require the order total to reach `amount`.
    #[must_use]
    pub fn with_min_order_amount(mut self, amount: Money<'a, Currency>) -> Self {
        self.min_order_amount = Some(amount);
        self
    }

    /// Cap the discount at `amount`. A zero cap means "no cap".
    #[must_use]
    pub fn with_max_discount(mut self, amount: Money<'a, Currency>) -> Self {
        self.max_discount = Some(amount);
        self
    }

    /// Restrict the coupon to the given scope.
    #[must_use]
    pub fn with_scope(mut self, scope: CouponScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// The coupon code.
    pub const fn code(&self) -> &CouponCode {
        &self.code
    }

    /// The discount kind.
    pub const fn kind(&self) -> &CouponKind<'a> {
        &self.kind
    }

    /// Minimum order amount, if any.
    pub const fn min_order_amount(&self) -> Option<&Money<'a, Currency>> {
        self.min_order_amount.as_ref()
    }

    /// Discount cap, if any.
    pub const fn max_discount(&self) -> Option<&Money<'a, Currency>> {
        self.max_discount.as_ref()
    }

    /// Validity window.
    pub const fn validity(&self) -> &ValidityWindow {
        &self.validity
    }

    /// Usage limit and count.
    pub const fn usage(&self) -> &UsageLimit {
        &self.usage
    }

    /// Product and category scope.
    pub const fn scope(&self) -> &CouponScope {
        &self.scope
    }

    /// Whether the coupon is switched on.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Percent points for percentage coupons, `0` for fixed coupons.
    pub const fn percentage_points(&self) -> u16 {
        match self.kind {
            CouponKind::PercentageOff { points } => points,
            CouponKind::AmountOff(_) => 0,
        }
    }

    /// Whether the coupon is active, within its window and below its usage limit.
    pub fn is_valid(&self, now: Timestamp) -> bool {
        self.active && self.validity.contains(now) && !self.usage.is_exhausted()
    }

    /// Like [`Coupon::is_valid`], naming the reason when it is not.
    ///
    /// # Errors
    ///
    /// Returns `Inactive`, `NotYetValid`, `Expired` or `UsageExhausted`.
    pub fn check_validity(&self, now: Timestamp) -> Result<(), CouponRejection> {
        if !self.active {
            return Err(CouponRejection::Inactive);
        }

        if self.validity.is_pending(now) {
            return Err(CouponRejection::NotYetValid);
        }

        if self.validity.has_ended(now) {
            return Err(CouponRejection::Expired);
        }

        if self.usage.is_exhausted() {
            return Err(CouponRejection::UsageExhausted);
        }

        Ok(())
    }

    /// Check whether the coupon can be applied to an order.
    ///
    /// # Errors
    ///
    /// Returns the first [`CouponRejection`] that applies, checked in
    /// declaration order.
    pub fn check(
        &self,
        order_total: &Money<'a, Currency>,
        products: &[ProductRef],
        now: Timestamp,
    ) -> Result<(), CouponRejection> {
        self.check_validity(now)?;

        if let Some(minimum) = &self.min_order_amount
            && order_total.to_minor_units() < minimum.to_minor_units()
        {
            return Err(CouponRejection::MinimumNotMet);
        }

        if !self.scope.applies_to(products) {
            return Err(CouponRejection::NotApplicable);
        }

        Ok(())
    }

    /// Calculate the discount this coupon gives on `order_total`.
    ///
    /// Returns zero whenever [`Coupon::check`] rejects the order. Otherwise a
    /// percentage or fixed amount, clamped first to the discount cap (when
    /// above zero) and then to the order total.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the percentage cannot be represented or
    /// the coupon amounts are in a different currency from `order_total`.
    pub fn calculate_discount(
        &self,
        order_total: Money<'a, Currency>,
        products: &[ProductRef],
        now: Timestamp,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        if self.check(&order_total, products, now).is_err() {
            return Ok(Money::from_minor(0, order_total.currency()));
        }

        let raw = match self.kind {
            CouponKind::PercentageOff { points } => {
                percent_of(order_total, &percentage_from_points(points))?
            }
            CouponKind::AmountOff(amount) => {
                ensure_same_currency(&order_total, &amount)?;
                amount
            }
        };

        let capped = match self.max_discount {
            Some(cap) if cap.to_minor_units() > 0 => min_money(raw, cap)?,
            Some(_) | None => raw,
        };

        let clamped = min_money(capped, order_total)?;

        if clamped.to_minor_units() < 0 {
            return Ok(Money::from_minor(0, order_total.currency()));
        }

        Ok(clamped)
    }

    /// Record one redemption.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::UsageExhausted`] if the limit has been reached.
    pub fn redeem(&mut self) -> Result<(), CouponError> {
        if self.usage.is_exhausted() {
            return Err(CouponError::UsageExhausted);
        }

        self.usage.used = self.usage.used.saturating_add(1);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rusty_money::iso::{INR, USD};
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    fn now() -> Timestamp {
        "2026-06-15T12:00:00Z"
            .parse()
            .unwrap_or_else(|_| unreachable!("fixture timestamp is valid"))
    }

    fn june() -> ValidityWindow {
        ValidityWindow::new(
            "2026-06-01T00:00:00Z"
                .parse()
                .unwrap_or_else(|_| unreachable!("fixture timestamp is valid")),
            "2026-06-30T23:59:59Z"
                .parse()
                .unwrap_or_else(|_| unreachable!("fixture timestamp is valid")),
        )
    }

    fn percentage(points: u16) -> Result<Coupon<'static>, CouponError> {
        Coupon::new(
            CouponCode::parse("TEST20").unwrap_or_else(|_| unreachable!("fixture code is valid")),
            CouponKind::PercentageOff { points },
            june(),
            UsageLimit::new(10),
        )
    }

    fn fixed(amount: i64) -> Result<Coupon<'static>, CouponError> {
        Coupon::new(
            CouponCode::parse("FLAT").unwrap_or_else(|_| unreachable!("fixture code is valid")),
            CouponKind::AmountOff(Money::from_minor(amount, INR)),
            june(),
            UsageLimit::new(10),
        )
    }

    fn inr(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, INR)
    }

    #[test]
    fn percentage_discount_is_proportional() -> TestResult {
        let coupon = percentage(20)?;

        assert_eq!(coupon.calculate_discount(inr(100_000), &[], now())?, inr(20_000));

        Ok(())
    }

    #[test]
    fn percentage_discount_is_capped() -> TestResult {
        let coupon = percentage(50)?.with_max_discount(inr(5_000));

        assert_eq!(coupon.calculate_discount(inr(100_000), &[], now())?, inr(5_000));

        Ok(())
    }

    #[test]
    fn zero_cap_means_uncapped() -> TestResult {
        let coupon = percentage(50)?.with_max_discount(inr(0));

        assert_eq!(coupon.calculate_discount(inr(100_000), &[], now())?, inr(50_000));

        Ok(())
    }

    #[test]
    fn fixed_discount_never_exceeds_order_total() -> TestResult {
        let coupon = fixed(10_000)?;

        assert_eq!(coupon.calculate_discount(inr(50_000), &[], now())?, inr(10_000));
        assert_eq!(coupon.calculate_discount(inr(4_000), &[], now())?, inr(4_000));

        Ok(())
    }

    #[test]
    fn fixed_discount_in_other_currency_is_an_error() -> TestResult {
        let coupon = fixed(1_000)?;
        let result = coupon.calculate_discount(Money::from_minor(5_000, USD), &[], now());

        assert!(matches!(result, Err(DiscountError::Money(_))));

        Ok(())
    }

    #[test]
    fn discount_is_zero_below_minimum() -> TestResult {
        let coupon = percentage(20)?.with_min_order_amount(inr(10_000));

        assert_eq!(coupon.calculate_discount(inr(5_000), &[], now())?, inr(0));
        assert_eq!(
            coupon.check(&inr(5_000), &[], now()),
            Err(CouponRejection::MinimumNotMet)
        );

        Ok(())
    }

    #[test]
    fn minimum_is_inclusive() -> TestResult {
        let coupon = percentage(10)?.with_min_order_amount(inr(10_000));

        assert_eq!(coupon.calculate_discount(inr(10_000), &[], now())?, inr(1_000));

        Ok(())
    }

    #[test]
    fn expired_coupon_gives_no_discount() -> TestResult {
        let coupon = percentage(20)?;
        let later = coupon.validity().until.checked_add(SignedDuration::from_secs(1))?;

        assert!(!coupon.is_valid(later));
        assert_eq!(coupon.check(&inr(1_000), &[], later), Err(CouponRejection::Expired));
        assert_eq!(coupon.calculate_discount(inr(1_000), &[], later)?, inr(0));

        Ok(())
    }

    #[test]
    fn coupon_before_window_is_not_yet_valid() -> TestResult {
        let coupon = percentage(20)?;
        let earlier = coupon.validity().from.checked_sub(SignedDuration::from_secs(1))?;

        assert_eq!(
            coupon.check(&inr(1_000), &[], earlier),
            Err(CouponRejection::NotYetValid)
        );

        Ok(())
    }

    #[test]
    fn exhausted_coupon_gives_no_discount() -> TestResult {
        let coupon = Coupon::new(
            CouponCode::parse("USED")?,
            CouponKind::PercentageOff { points: 20 },
            june(),
            UsageLimit::new(3).with_used(3),
        )?;

        assert!(!coupon.is_valid(now()));
        assert_eq!(coupon.calculate_discount(inr(1_000), &[], now())?, inr(0));

        Ok(())
    }

    #[test]
    fn inactive_coupon_is_rejected_first() -> TestResult {
        let coupon = percentage(20)?.with_active(false);
        let later = coupon.validity().until.checked_add(SignedDuration::from_secs(1))?;

        assert_eq!(coupon.check(&inr(1_000), &[], later), Err(CouponRejection::Inactive));

        Ok(())
    }

    #[test]
    fn scoped_coupon_requires_a_matching_product() -> TestResult {
        let included = Uuid::now_v7();
        let coupon = percentage(10)?.with_scope(CouponScope::unrestricted().with_products([included]));

        let other = [ProductRef::new(Uuid::now_v7())];
        let matching = [ProductRef::new(Uuid::now_v7()), ProductRef::new(included)];

        assert_eq!(coupon.calculate_discount(inr(10_000), &other, now())?, inr(0));
        assert_eq!(coupon.calculate_discount(inr(10_000), &matching, now())?, inr(1_000));

        Ok(())
    }

    #[test]
    fn invalid_percentages_are_rejected() {
        assert_eq!(percentage(0), Err(CouponError::InvalidPercentage(0)));
        assert_eq!(percentage(101), Err(CouponError::InvalidPercentage(101)));
    }

    #[test]
    fn negative_fixed_amount_is_rejected() {
        assert_eq!(fixed(-1), Err(CouponError::NegativeAmount));
    }

    #[test]
    fn inverted_window_is_rejected() -> TestResult {
        let window = june();
        let result = Coupon::new(
            CouponCode::parse("BACKWARDS")?,
            CouponKind::PercentageOff { points: 5 },
            ValidityWindow::new(window.until, window.from),
            UsageLimit::new(1),
        );

        assert_eq!(result, Err(CouponError::InvalidWindow));

        Ok(())
    }

    #[test]
    fn redeem_increments_until_exhausted() -> TestResult {
        let mut coupon = Coupon::new(
            CouponCode::parse("ONCE")?,
            CouponKind::PercentageOff { points: 5 },
            june(),
            UsageLimit::new(1),
        )?;

        coupon.redeem()?;

        assert_eq!(coupon.usage().used, 1);
        assert_eq!(coupon.redeem(), Err(CouponError::UsageExhausted));

        Ok(())
    }

    #[test]
    fn percentage_points_reports_kind() -> TestResult {
        assert_eq!(percentage(15)?.percentage_points(), 15);
        assert_eq!(fixed(100)?.percentage_points(), 0);

        Ok(())
    }

    #[test]
    fn only_minimum_and_scope_rejections_are_order_specific() {
        let order_specific = [
            CouponRejection::Inactive,
            CouponRejection::NotYetValid,
            CouponRejection::Expired,
            CouponRejection::UsageExhausted,
            CouponRejection::MinimumNotMet,
            CouponRejection::NotApplicable,
        ]
        .into_iter()
        .filter(CouponRejection::is_order_specific)
        .collect::<Vec<_>>();

        assert_eq!(
            order_specific,
            [CouponRejection::MinimumNotMet, CouponRejection::NotApplicable]
        );
    }
}
