//! Deactivate Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    coupons::{CouponResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Deactivate Coupon Handler
///
/// Coupons are never removed; orders keep referencing them.
#[endpoint(
    tags("coupons"),
    summary = "Deactivate Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Coupon deactivated"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupon = state
        .app
        .coupons
        .deactivate_coupon(&code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupon.into()))
}
