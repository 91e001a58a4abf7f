//! Coupon Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::coupons::records::{CouponRecord, CouponValue};

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod validate;

/// Coupon discount kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CouponKindPayload {
    /// `value` is whole percent points
    Percentage,

    /// `value` is minor units
    Fixed,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CouponResponse {
    /// Coupon UUID
    pub uuid: Uuid,

    /// Normalised coupon code
    pub code: String,

    /// Discount kind
    pub kind: CouponKindPayload,

    /// Percent points or minor units, per `kind`
    pub value: u64,

    /// Minimum order total in minor units; 0 for none
    pub min_order_amount: u64,

    /// Discount cap in minor units; 0 for uncapped
    pub max_discount: u64,

    /// Start of the validity window
    pub valid_from: String,

    /// End of the validity window
    pub valid_until: String,

    /// Maximum number of redemptions
    pub usage_limit: u32,

    /// Redemptions so far
    pub used_count: u32,

    /// Products the coupon is restricted to
    pub products: Vec<Uuid>,

    /// Categories the coupon is restricted to
    pub categories: Vec<Uuid>,

    /// Whether the coupon can be redeemed
    pub active: bool,
}

impl From<CouponRecord> for CouponResponse {
    fn from(coupon: CouponRecord) -> Self {
        let kind = match coupon.value {
            CouponValue::Percentage(_) => CouponKindPayload::Percentage,
            CouponValue::Fixed(_) => CouponKindPayload::Fixed,
        };

        CouponResponse {
            uuid: coupon.uuid.into(),
            code: coupon.code,
            kind,
            value: coupon.value.value(),
            min_order_amount: coupon.min_order_amount,
            max_discount: coupon.max_discount,
            valid_from: coupon.valid_from.to_string(),
            valid_until: coupon.valid_until.to_string(),
            usage_limit: coupon.usage_limit,
            used_count: coupon.used_count,
            products: coupon.products.into_iter().map(Into::into).collect(),
            categories: coupon.categories.into_iter().map(Into::into).collect(),
            active: coupon.active,
        }
    }
}
