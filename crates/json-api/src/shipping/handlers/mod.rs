//! Shipping Handlers

pub(crate) mod calculate;
