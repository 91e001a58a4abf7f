//! Orders Data

use jiff::Timestamp;
use storefront::shipping::{ShippingAddress, ShippingMethod};

use crate::domain::{
    coupons::records::CouponUuid,
    orders::records::OrderUuid,
    products::records::ProductUuid,
    users::records::UserUuid,
};

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub items: Vec<NewOrderItem>,
    pub coupon_code: Option<String>,
    pub shipping_address: ShippingAddress,
    pub shipping_method: ShippingMethod,
    pub payment_method: String,
}

/// New Order Item Data
///
/// `price` is the price the client saw; the catalogue price is charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductUuid,
    pub quantity: u32,
    pub price: Option<u64>,
}

/// Order row as written, before items are attached.
#[derive(Debug, Clone)]
pub(crate) struct OrderDraft {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub coupon: Option<CouponUuid>,
    pub coupon_code: Option<String>,
    pub currency: &'static str,
    pub subtotal: u64,
    pub discount_amount: u64,
    pub discount_percentage: u16,
    pub shipping_method: ShippingMethod,
    pub shipping_cost: u64,
    pub shipping_address: ShippingAddress,
    pub total: u64,
    pub payment_method: String,
    pub estimated_delivery: Timestamp,
}
