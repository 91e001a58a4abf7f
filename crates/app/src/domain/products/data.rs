//! Products Data

use crate::domain::products::records::{CategoryUuid, ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub stock: u64,
    pub category: Option<CategoryUuid>,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub price: u64,
    pub stock: u64,
    pub category: Option<CategoryUuid>,
}
