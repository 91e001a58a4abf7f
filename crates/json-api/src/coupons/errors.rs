//! Coupon Errors

use salvo::http::StatusError;
use storefront::coupons::CouponRejection;
use tracing::error;

use storefront_app::domain::coupons::CouponsServiceError;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Coupon code already exists")
        }
        CouponsServiceError::NotFound => StatusError::not_found().brief("Coupon not found"),
        CouponsServiceError::InvalidCode(_) => {
            StatusError::bad_request().brief("Invalid coupon code")
        }
        CouponsServiceError::InvalidCoupon(source) => {
            StatusError::bad_request().brief(format!("Invalid coupon: {source}"))
        }
        CouponsServiceError::InvalidAmount(_) => {
            StatusError::bad_request().brief("Amount is out of range")
        }
        CouponsServiceError::InvalidReference
        | CouponsServiceError::MissingRequiredData
        | CouponsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid coupon payload")
        }
        CouponsServiceError::Discount(source) => {
            error!("failed to calculate coupon discount: {source}");

            StatusError::internal_server_error()
        }
        CouponsServiceError::Sql(source) => {
            error!("coupon storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// 400 naming why a coupon cannot be used.
pub(crate) fn rejection_status_error(reason: CouponRejection) -> StatusError {
    let brief = match reason {
        CouponRejection::Inactive => "Coupon is not active",
        CouponRejection::NotYetValid => "Coupon is not valid yet",
        CouponRejection::Expired => "Coupon has expired",
        CouponRejection::UsageExhausted => "Coupon usage limit reached",
        CouponRejection::MinimumNotMet => "Order total is below the coupon minimum",
        CouponRejection::NotApplicable => "Coupon does not apply to these products",
    };

    StatusError::bad_request().brief(brief)
}
