//! Coupons

mod errors;
mod handlers;

pub(crate) use errors::rejection_status_error;
pub(crate) use handlers::*;
