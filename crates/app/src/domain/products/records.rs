//! Product Records

use jiff::Timestamp;
use storefront::items::ProductRef;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub stock: u64,
    pub category: Option<CategoryUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ProductRecord {
    /// Reference used by coupon scope checks.
    pub fn product_ref(&self) -> ProductRef {
        ProductRef {
            uuid: self.uuid.into_uuid(),
            category: self.category.map(CategoryUuid::into_uuid),
        }
    }
}

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord;
