//! Update Payment Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::orders::PaymentStatus;
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Update Payment Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePaymentStatusRequest {
    /// One of pending, paid or failed
    pub payment_status: String,
}

/// Update Payment Status Handler
#[endpoint(
    tags("orders"),
    summary = "Update Payment Status",
    responses(
        (status_code = StatusCode::OK, description = "Payment status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or disallowed transition"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdatePaymentStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let user = depot.user_uuid_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let next = json
        .into_inner()
        .payment_status
        .parse::<PaymentStatus>()
        .or_400("Unknown payment status")?;

    let order = state
        .app
        .orders
        .update_payment_status(order.into_inner().into(), next)
        .await
        .map_err(into_status_error)?;

    info!(
        order = %order.uuid,
        user = %user,
        payment_status = %next,
        "order payment status changed"
    );

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{
        MockOrdersService, OrdersServiceError, records::OrderUuid,
    };

    use crate::test_helpers::{Mocks, orders_service};

    use super::{super::tests::make_order, *};

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(
            orders,
            Router::with_path("orders/{order}/payment").put(handler),
        )
    }

    #[tokio::test]
    async fn test_mark_paid() -> TestResult {
        let mut orders = MockOrdersService::new();
        let uuid = OrderUuid::new();

        orders
            .expect_update_payment_status()
            .once()
            .withf(move |order, next| *order == uuid && *next == PaymentStatus::Paid)
            .return_once(move |_, next| {
                let mut order = make_order(uuid);
                order.payment_status = next;

                Ok(order)
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/payment"))
            .json(&json!({ "paymentStatus": "paid" }))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.payment_status, "paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_payment_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_payment_status().never();

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/payment",
            OrderUuid::new()
        ))
        .json(&json!({ "paymentStatus": "refunded" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_paid_order_cannot_be_marked_failed() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_payment_status().once().return_once(|_, _| {
            Err(OrdersServiceError::InvalidTransition {
                from: "paid",
                to: "failed",
            })
        });

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/payment",
            OrderUuid::new()
        ))
        .json(&json!({ "paymentStatus": "failed" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_payment_without_user_returns_401() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_payment_status().never();

        let service = Mocks {
            orders,
            ..Mocks::default()
        }
        .anonymous_service(Router::with_path("orders/{order}/payment").put(handler));

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/payment",
            OrderUuid::new()
        ))
        .json(&json!({ "paymentStatus": "paid" }))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
