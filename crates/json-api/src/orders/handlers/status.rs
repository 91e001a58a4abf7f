//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::orders::OrderStatus;
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// One of pending, processing, shipped, delivered or cancelled
    pub status: String,
}

/// Update Order Status Handler
///
/// Cancelling an order returns its items to stock.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or disallowed transition"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let user = depot.user_uuid_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let next = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("Unknown order status")?;

    let order = state
        .app
        .orders
        .update_status(order.into_inner().into(), next)
        .await
        .map_err(into_status_error)?;

    info!(
        order = %order.uuid,
        user = %user,
        status = %next,
        "order status changed"
    );

    Ok(Json(order.into()))
}
