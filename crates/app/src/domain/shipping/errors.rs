//! Shipping service errors.

use std::num::TryFromIntError;

use storefront::shipping::ShippingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShippingServiceError {
    #[error("invalid amount")]
    InvalidAmount(#[from] TryFromIntError),

    #[error("shipping calculation failed")]
    Shipping(#[from] ShippingError),
}
