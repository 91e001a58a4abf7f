//! Coupon Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    coupons::{CouponResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponsResponse {
    /// All coupons, oldest first
    pub coupons: Vec<CouponResponse>,
}

/// Coupon Index Handler
#[endpoint(tags("coupons"), summary = "List Coupons")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupons = state
        .app
        .coupons
        .list_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponsResponse {
        coupons: coupons.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::coupons::{MockCouponsService, records::CouponValue};

    use crate::test_helpers::coupons_service;

    use super::{super::tests::make_coupon, *};

    #[tokio::test]
    async fn test_index_returns_coupons() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons.expect_list_coupons().once().return_once(|| {
            Ok(vec![
                make_coupon("TEST20", CouponValue::Percentage(20)),
                make_coupon("FLAT500", CouponValue::Fixed(500)),
            ])
        });

        let mut res = TestClient::get("http://example.com/coupons")
            .send(&coupons_service(coupons, Router::with_path("coupons").get(handler)))
            .await;

        let body: CouponsResponse = res.take_json().await?;
        let codes: Vec<_> = body.coupons.iter().map(|c| c.code.as_str()).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(codes, vec!["TEST20", "FLAT500"]);

        Ok(())
    }
}
