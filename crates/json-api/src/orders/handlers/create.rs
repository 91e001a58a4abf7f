//! Create Order Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{
    data::{NewOrder, NewOrderItem},
    records::OrderUuid,
};

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    shipping::models::{AddressPayload, ShippingMethodPayload},
    state::State,
};

/// Order line as submitted
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
    /// Product UUID
    pub product: Uuid,

    /// Units to order
    pub quantity: u32,

    /// Unit price the client saw, in minor units; the catalogue price is charged
    #[serde(default)]
    pub price: Option<u64>,
}

impl From<OrderItemRequest> for NewOrderItem {
    fn from(item: OrderItemRequest) -> Self {
        NewOrderItem {
            product: item.product.into(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    /// Order UUID; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    /// Order lines
    pub items: Vec<OrderItemRequest>,

    /// Coupon to apply
    #[serde(default)]
    pub coupon_code: Option<String>,

    /// Delivery address
    pub shipping_address: AddressPayload,

    /// Shipping method; standard when omitted
    #[serde(default)]
    pub shipping_method: ShippingMethodPayload,

    /// Payment method, e.g. "card" or "upi"
    pub payment_method: String,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            uuid: request.uuid.map_or_else(OrderUuid::new, Into::into),
            items: request.items.into_iter().map(Into::into).collect(),
            coupon_code: request
                .coupon_code
                .filter(|code| !code.trim().is_empty()),
            shipping_address: request.shipping_address.into(),
            shipping_method: request.shipping_method.into(),
            payment_method: request.payment_method,
        }
    }
}

/// Create Order Handler
///
/// Prices the order, applies the coupon and reserves stock in one step.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order cannot be placed"),
        (status_code = StatusCode::NOT_FOUND, description = "Product or coupon not found"),
        (status_code = StatusCode::CONFLICT, description = "Order already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .create_order(user, json.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
