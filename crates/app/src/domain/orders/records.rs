//! Order Records

use jiff::Timestamp;
use storefront::{
    orders::{OrderStatus, PaymentStatus},
    shipping::{ShippingAddress, ShippingMethod},
};

use crate::{
    domain::{coupons::records::CouponUuid, products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record
///
/// Amounts are minor units of `currency`, stored exactly as assembled by the
/// pricing core.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub coupon: Option<CouponUuid>,
    pub coupon_code: Option<String>,
    pub currency: String,
    pub items: Vec<OrderItemRecord>,
    pub subtotal: u64,
    pub discount_amount: u64,
    pub discount_percentage: u16,
    pub shipping_method: ShippingMethod,
    pub shipping_cost: u64,
    pub shipping_address: ShippingAddress,
    pub total: u64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub estimated_delivery: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub product: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
}
