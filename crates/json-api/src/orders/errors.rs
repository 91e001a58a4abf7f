//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

use crate::coupons::rejection_status_error;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::ProductNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        OrdersServiceError::CouponNotFound => StatusError::not_found().brief("Coupon not found"),
        OrdersServiceError::NoItems => StatusError::bad_request().brief("Order has no items"),
        OrdersServiceError::InvalidLineItem(source) => {
            StatusError::bad_request().brief(format!("Invalid line item: {source}"))
        }
        error @ OrdersServiceError::InsufficientStock { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        OrdersServiceError::InvalidCouponCode(_) => {
            StatusError::bad_request().brief("Invalid coupon code")
        }
        OrdersServiceError::CouponRejected(reason) => rejection_status_error(reason),
        error @ OrdersServiceError::InvalidTransition { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::InvalidAmount(source) => {
            error!("order amount out of range: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Coupon(source) => {
            error!("failed to load order coupon: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Totals(source) => {
            error!("failed to assemble order totals: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Shipping(source) => {
            error!("failed to estimate delivery: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
