//! Validate Coupon Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    coupons::{
        CouponResponse,
        errors::{into_status_error, rejection_status_error},
    },
    extensions::*,
    state::State,
};

/// Validate Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValidateCouponRequest {
    /// Coupon code
    pub code: String,

    /// Order subtotal in minor units
    pub order_total: u64,

    /// Products in the order
    #[serde(default)]
    pub order_products: Vec<Uuid>,
}

/// Coupon Validation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CouponValidationResponse {
    /// Whether the coupon would discount this order
    pub valid: bool,

    /// Discount the coupon would grant, in minor units
    pub discount: u64,

    /// Why the coupon does not apply to this order, when `valid` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// The coupon
    pub coupon: CouponResponse,
}

/// Validate Coupon Handler
///
/// Checks a coupon against a prospective order without redeeming it. A
/// coupon that is usable but misses this order's minimum or products is
/// reported with `valid: false` and a reason; an unusable coupon is a 400.
#[endpoint(
    tags("coupons"),
    summary = "Validate Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Coupon checked against the order"),
        (status_code = StatusCode::BAD_REQUEST, description = "Coupon is inactive, outside its window or used up"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidateCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<CouponValidationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let validation = state
        .app
        .coupons
        .validate_coupon(
            &request.code,
            request.order_total,
            request.order_products.into_iter().map(Into::into).collect(),
            Timestamp::now(),
        )
        .await
        .map_err(into_status_error)?;

    let reason = match validation.rejection {
        Some(reason) if reason.is_order_specific() => Some(reason.as_str().to_string()),
        Some(reason) => return Err(rejection_status_error(reason)),
        None => None,
    };

    Ok(Json(CouponValidationResponse {
        valid: validation.valid && reason.is_none(),
        discount: if reason.is_none() { validation.discount } else { 0 },
        reason,
        coupon: validation.coupon.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront::coupons::CouponRejection;
    use testresult::TestResult;

    use storefront_app::domain::{
        coupons::{
            CouponsServiceError, MockCouponsService, data::CouponValidation, records::CouponValue,
        },
        products::records::ProductUuid,
    };

    use crate::test_helpers::coupons_service;

    use super::{super::tests::make_coupon, *};

    fn make_service(coupons: MockCouponsService) -> Service {
        coupons_service(coupons, Router::with_path("coupons/validate").post(handler))
    }

    #[tokio::test]
    async fn test_valid_coupon_returns_discount() -> TestResult {
        let product = ProductUuid::new();
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_validate_coupon()
            .once()
            .withf(move |code, total, products, _| {
                code == "TEST20" && *total == 100_000 && products.as_slice() == [product]
            })
            .return_once(|_, _, _, _| {
                Ok(CouponValidation {
                    valid: true,
                    discount: 20_000,
                    rejection: None,
                    coupon: make_coupon("TEST20", CouponValue::Percentage(20)),
                })
            });

        let mut res = TestClient::post("http://example.com/coupons/validate")
            .json(&json!({
                "code": "TEST20",
                "orderTotal": 100_000,
                "orderProducts": [product.into_uuid()],
            }))
            .send(&make_service(coupons))
            .await;

        let body: CouponValidationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.valid);
        assert_eq!(body.discount, 20_000);
        assert_eq!(body.reason, None);
        assert_eq!(body.coupon.code, "TEST20");

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_coupon_returns_400() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_validate_coupon()
            .once()
            .return_once(|_, _, _, _| {
                Ok(CouponValidation {
                    valid: false,
                    discount: 0,
                    rejection: Some(CouponRejection::Expired),
                    coupon: make_coupon("OLD", CouponValue::Fixed(100)),
                })
            });

        let res = TestClient::post("http://example.com/coupons/validate")
            .json(&json!({ "code": "OLD", "orderTotal": 5_000 }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_minimum_not_met_is_reported_as_invalid() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_validate_coupon()
            .once()
            .return_once(|_, _, _, _| {
                Ok(CouponValidation {
                    valid: false,
                    discount: 0,
                    rejection: Some(CouponRejection::MinimumNotMet),
                    coupon: make_coupon("MIN100", CouponValue::Percentage(10)),
                })
            });

        let mut res = TestClient::post("http://example.com/coupons/validate")
            .json(&json!({ "code": "MIN100", "orderTotal": 5_000 }))
            .send(&make_service(coupons))
            .await;

        let body: CouponValidationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(!body.valid);
        assert_eq!(body.discount, 0);
        assert_eq!(body.reason.as_deref(), Some("minimum_not_met"));
        assert_eq!(body.coupon.code, "MIN100");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_coupon_returns_404() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_validate_coupon()
            .once()
            .return_once(|_, _, _, _| Err(CouponsServiceError::NotFound));

        let res = TestClient::post("http://example.com/coupons/validate")
            .json(&json!({ "code": "NOPE", "orderTotal": 5_000 }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
