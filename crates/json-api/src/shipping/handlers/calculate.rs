//! Calculate Shipping Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    shipping::{
        errors::into_status_error,
        models::{AddressPayload, ShippingMethodPayload},
    },
    state::State,
};

/// Calculate Shipping Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CalculateShippingRequest {
    /// Order total in minor units, after any discount
    pub order_total: u64,

    /// Delivery address
    #[serde(default)]
    pub shipping_address: AddressPayload,

    /// Shipping method; standard when omitted
    #[serde(default)]
    pub shipping_method: ShippingMethodPayload,
}

/// Shipping Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingQuoteResponse {
    /// Shipping cost in minor units
    pub shipping_cost: u64,

    /// Estimated delivery instant
    pub estimated_delivery_date: String,
}

/// Calculate Shipping Handler
///
/// Quotes shipping cost and delivery date for an order.
#[endpoint(
    tags("shipping"),
    summary = "Calculate Shipping",
    responses(
        (status_code = StatusCode::OK, description = "Shipping quoted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CalculateShippingRequest>,
    depot: &mut Depot,
) -> Result<Json<ShippingQuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let estimate = state
        .app
        .shipping
        .quote(
            request.shipping_method.into(),
            request.shipping_address.into(),
            request.order_total,
            Timestamp::now(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(ShippingQuoteResponse {
        shipping_cost: estimate.cost,
        estimated_delivery_date: estimate.estimated_delivery.to_string(),
    }))
}
