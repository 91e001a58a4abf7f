//! Orders service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use storefront::{
    coupons::{CouponCodeError, CouponRejection},
    items::LineItemError,
    orders::OrderTotalsError,
    shipping::ShippingError,
};
use thiserror::Error;

use crate::domain::{coupons::CouponsServiceError, products::records::ProductUuid};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("order has no items")]
    NoItems,

    #[error("invalid line item")]
    InvalidLineItem(#[from] LineItemError),

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductUuid,
        requested: u64,
        available: u64,
    },

    #[error("invalid coupon code")]
    InvalidCouponCode(#[from] CouponCodeError),

    #[error("coupon not found")]
    CouponNotFound,

    #[error("coupon rejected: {0}")]
    CouponRejected(CouponRejection),

    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("invalid amount")]
    InvalidAmount(#[from] TryFromIntError),

    #[error("coupon could not be loaded")]
    Coupon(#[from] CouponsServiceError),

    #[error("order totals could not be assembled")]
    Totals(#[source] OrderTotalsError),

    #[error("delivery could not be estimated")]
    Shipping(#[from] ShippingError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<OrderTotalsError> for OrdersServiceError {
    fn from(error: OrderTotalsError) -> Self {
        match error {
            OrderTotalsError::NoItems => Self::NoItems,
            OrderTotalsError::CouponRejected(reason) => Self::CouponRejected(reason),
            other => Self::Totals(other),
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupon_rejection_keeps_reason() {
        let error = OrdersServiceError::from(OrderTotalsError::CouponRejected(
            CouponRejection::Expired,
        ));

        assert!(matches!(
            error,
            OrdersServiceError::CouponRejected(CouponRejection::Expired)
        ));
    }

    #[test]
    fn invariant_violation_stays_a_totals_error() {
        let error = OrdersServiceError::from(OrderTotalsError::InvariantViolated("negative total"));

        assert!(matches!(
            error,
            OrdersServiceError::Totals(OrderTotalsError::InvariantViolated(_))
        ));
    }
}
