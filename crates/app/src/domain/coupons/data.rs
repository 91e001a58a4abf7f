//! Coupons Data

use jiff::Timestamp;
use storefront::coupons::{CouponCode, CouponRejection};

use crate::domain::{
    coupons::records::{CouponRecord, CouponUuid, CouponValue},
    products::records::{CategoryUuid, ProductUuid},
};

/// New Coupon Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCoupon {
    pub uuid: CouponUuid,
    pub code: CouponCode,
    pub value: CouponValue,
    pub min_order_amount: u64,
    pub max_discount: u64,
    pub valid_from: Timestamp,
    pub valid_until: Timestamp,
    pub usage_limit: u32,
    pub products: Vec<ProductUuid>,
    pub categories: Vec<CategoryUuid>,
}

/// Outcome of checking a coupon against a prospective order.
#[derive(Debug, Clone)]
pub struct CouponValidation {
    pub valid: bool,
    pub discount: u64,
    pub rejection: Option<CouponRejection>,
    pub coupon: CouponRecord,
}
