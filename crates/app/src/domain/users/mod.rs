//! Users
//!
//! Users are managed upstream; orders only carry the user's UUID.

pub mod records;
