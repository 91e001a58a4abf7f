//! Order Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::shipping::models::{AddressPayload, ShippingMethodPayload};

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod payment;
pub(crate) mod status;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    /// Order item UUID
    pub uuid: Uuid,

    /// Ordered product
    pub product: Uuid,

    /// Units ordered
    pub quantity: u32,

    /// Price charged per unit in minor units
    pub unit_price: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            uuid: item.uuid.into(),
            product: item.product.into(),
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    /// Order UUID
    pub uuid: Uuid,

    /// User who placed the order
    pub user: Uuid,

    /// Coupon code applied, if any
    pub coupon_code: Option<String>,

    /// ISO 4217 currency code of every amount
    pub currency: String,

    /// Ordered items
    pub items: Vec<OrderItemResponse>,

    /// Sum of line totals in minor units
    pub subtotal: u64,

    /// Coupon discount in minor units
    pub discount_amount: u64,

    /// Coupon percentage; 0 for fixed coupons or none
    pub discount_percentage: u16,

    /// Shipping method
    pub shipping_method: ShippingMethodPayload,

    /// Shipping cost in minor units
    pub shipping_cost: u64,

    /// Delivery address
    pub shipping_address: AddressPayload,

    /// Amount payable in minor units
    pub total: u64,

    /// Fulfilment status
    pub status: String,

    /// Payment status
    pub payment_status: String,

    /// Payment method chosen at checkout
    pub payment_method: String,

    /// Estimated delivery date
    pub estimated_delivery: String,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user: order.user.into(),
            coupon_code: order.coupon_code,
            currency: order.currency,
            items: order.items.into_iter().map(Into::into).collect(),
            subtotal: order.subtotal,
            discount_amount: order.discount_amount,
            discount_percentage: order.discount_percentage,
            shipping_method: order.shipping_method.into(),
            shipping_cost: order.shipping_cost,
            shipping_address: order.shipping_address.into(),
            total: order.total,
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            payment_method: order.payment_method,
            estimated_delivery: order.estimated_delivery.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}
