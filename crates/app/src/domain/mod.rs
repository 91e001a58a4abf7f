//! Storefront Domain Concerns

pub mod coupons;
pub mod orders;
pub mod products;
pub mod shipping;
pub mod users;
