//! Storefront
//!
//! Order pricing for a storefront: line items, coupon validation and discounts,
//! flat-rate shipping and order total assembly. Everything here is pure
//! computation over [`rusty_money::Money`]; persistence and HTTP live in the
//! `storefront-app` and `storefront-json` crates.

pub mod coupons;
pub mod discounts;
pub mod items;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod shipping;
