//! Users
//!
//! The gateway authenticates users and forwards their UUID in a header.

pub(crate) mod middleware;
