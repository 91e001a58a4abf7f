//! Coupon Records

use jiff::Timestamp;
use rusty_money::iso::Currency;
use storefront::coupons::{
    Coupon, CouponCode, CouponKind, CouponScope, UsageLimit, ValidityWindow,
};

use crate::{
    amounts::to_money,
    domain::{
        coupons::errors::CouponsServiceError,
        products::records::{CategoryUuid, ProductUuid},
    },
    uuids::TypedUuid,
};

/// Coupon UUID
pub type CouponUuid = TypedUuid<CouponRecord>;

/// Discount a coupon grants, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponValue {
    /// Whole percent points
    Percentage(u16),

    /// Minor units of the store currency
    Fixed(u64),
}

impl CouponValue {
    /// Stored `kind` column value.
    pub const fn kind_as_str(&self) -> &'static str {
        match self {
            Self::Percentage(_) => "percentage",
            Self::Fixed(_) => "fixed",
        }
    }

    /// Stored `value` column value.
    pub fn value(&self) -> u64 {
        match self {
            Self::Percentage(points) => u64::from(*points),
            Self::Fixed(amount) => *amount,
        }
    }

    /// Rebuild from the stored `kind` and `value` columns.
    pub fn from_parts(kind: &str, value: u64) -> Option<Self> {
        match kind {
            "percentage" => u16::try_from(value).ok().map(Self::Percentage),
            "fixed" => Some(Self::Fixed(value)),
            _ => None,
        }
    }
}

/// Coupon Record
#[derive(Debug, Clone)]
pub struct CouponRecord {
    pub uuid: CouponUuid,
    pub code: String,
    pub value: CouponValue,
    pub min_order_amount: u64,
    pub max_discount: u64,
    pub valid_from: Timestamp,
    pub valid_until: Timestamp,
    pub usage_limit: u32,
    pub used_count: u32,
    pub products: Vec<ProductUuid>,
    pub categories: Vec<CategoryUuid>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CouponRecord {
    /// Build the pricing coupon in the store currency.
    ///
    /// Zero minimum and zero cap mean "none".
    ///
    /// # Errors
    ///
    /// Returns an error when the stored values no longer form a valid coupon.
    pub fn to_coupon<'a>(&self, currency: &'a Currency) -> Result<Coupon<'a>, CouponsServiceError> {
        let kind = match self.value {
            CouponValue::Percentage(points) => CouponKind::PercentageOff { points },
            CouponValue::Fixed(amount) => CouponKind::AmountOff(to_money(amount, currency)?),
        };

        let scope = CouponScope::unrestricted()
            .with_products(self.products.iter().map(|p| p.into_uuid()))
            .with_categories(self.categories.iter().map(|c| c.into_uuid()));

        let mut coupon = Coupon::new(
            CouponCode::parse(&self.code)?,
            kind,
            ValidityWindow::new(self.valid_from, self.valid_until),
            UsageLimit::new(self.usage_limit).with_used(self.used_count),
        )?
        .with_scope(scope)
        .with_active(self.active);

        if self.min_order_amount > 0 {
            coupon = coupon.with_min_order_amount(to_money(self.min_order_amount, currency)?);
        }

        if self.max_discount > 0 {
            coupon = coupon.with_max_discount(to_money(self.max_discount, currency)?);
        }

        Ok(coupon)
    }
}
