//! Create Coupon Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::coupons::CouponCode;
use uuid::Uuid;

use storefront_app::domain::coupons::{
    data::NewCoupon,
    records::{CouponUuid, CouponValue},
};

use crate::{
    coupons::{CouponKindPayload, CouponResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Create Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCouponRequest {
    /// Coupon UUID; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    /// Coupon code; stored uppercased
    pub code: String,

    /// Discount kind
    pub kind: CouponKindPayload,

    /// Percent points (1 to 100) or minor units, per `kind`
    pub value: u64,

    /// Minimum order total in minor units
    #[serde(default)]
    pub min_order_amount: u64,

    /// Discount cap in minor units; 0 for uncapped
    #[serde(default)]
    pub max_discount: u64,

    /// Start of the validity window; now when omitted
    #[serde(default)]
    pub valid_from: Option<String>,

    /// End of the validity window
    pub valid_until: String,

    /// Maximum number of redemptions
    pub usage_limit: u32,

    /// Restrict to these products
    #[serde(default)]
    pub products: Vec<Uuid>,

    /// Restrict to these categories
    #[serde(default)]
    pub categories: Vec<Uuid>,
}

impl CreateCouponRequest {
    fn into_new_coupon(self, now: Timestamp) -> Result<NewCoupon, StatusError> {
        let code = CouponCode::parse(&self.code).or_400("Invalid coupon code")?;

        let value = match self.kind {
            CouponKindPayload::Percentage => CouponValue::Percentage(
                u16::try_from(self.value).or_400("Percentage must be between 1 and 100")?,
            ),
            CouponKindPayload::Fixed => CouponValue::Fixed(self.value),
        };

        let valid_from = self
            .valid_from
            .map(|value| value.parse::<Timestamp>())
            .transpose()
            .or_400("could not parse \"validFrom\"")?
            .unwrap_or(now);

        let valid_until = self
            .valid_until
            .parse::<Timestamp>()
            .or_400("could not parse \"validUntil\"")?;

        Ok(NewCoupon {
            uuid: self.uuid.map_or_else(CouponUuid::new, Into::into),
            code,
            value,
            min_order_amount: self.min_order_amount,
            max_discount: self.max_discount,
            valid_from,
            valid_until,
            usage_limit: self.usage_limit,
            products: self.products.into_iter().map(Into::into).collect(),
            categories: self.categories.into_iter().map(Into::into).collect(),
        })
    }
}

/// Create Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Create Coupon",
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::CONFLICT, description = "Coupon code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let coupon = json.into_inner().into_new_coupon(Timestamp::now())?;

    let coupon = state
        .app
        .coupons
        .create_coupon(coupon)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/coupons/{}", coupon.code), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(coupon.into()))
}
