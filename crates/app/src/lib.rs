//! Shared application domain and persistence modules.

pub mod amounts;
pub mod context;
pub mod database;
pub mod domain;
pub mod health;

#[cfg(test)]
mod test;

mod uuids;
