//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    coupons::{
        Coupon, CouponCode, CouponCodeError, CouponError, CouponKind, CouponRejection, CouponScope,
        UsageLimit, ValidityWindow,
    },
    discounts::DiscountError,
    items::{LineItem, LineItemError, ProductRef},
    orders::{
        OrderDiscount, OrderStatus, OrderTotals, OrderTotalsError, PaymentStatus,
        StatusParseError,
    },
    pricing::{PricingError, line_total, subtotal},
    shipping::{ShippingAddress, ShippingError, ShippingMethod, ShippingQuote, ShippingRates},
};
