//! Handler extension traits
//!
//! Handlers bring these into scope with `use crate::extensions::*;`.

mod depot;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
