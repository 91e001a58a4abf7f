//! Shipping Errors

use salvo::http::StatusError;
use storefront::shipping::ShippingError;
use tracing::error;

use storefront_app::domain::shipping::ShippingServiceError;

pub(crate) fn into_status_error(error: ShippingServiceError) -> StatusError {
    match error {
        ShippingServiceError::InvalidAmount(_) => {
            StatusError::bad_request().brief("Order total is out of range")
        }
        ShippingServiceError::Shipping(ShippingError::UnknownMethod(method)) => {
            StatusError::bad_request().brief(format!("Unknown shipping method {method:?}"))
        }
        ShippingServiceError::Shipping(source) => {
            error!("failed to calculate shipping: {source}");

            StatusError::internal_server_error()
        }
    }
}
