//! Line Items

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when constructing a line item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineItemError {
    /// Quantity must be at least one.
    #[error("line item quantity must be at least one")]
    ZeroQuantity,

    /// Unit prices cannot be negative.
    #[error("line item unit price cannot be negative")]
    NegativePrice,
}

/// Reference to the catalogue product a line item was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductRef {
    /// Product UUID
    pub uuid: Uuid,

    /// Category the product belongs to, if any
    pub category: Option<Uuid>,
}

impl ProductRef {
    /// Reference a product without a category.
    #[must_use]
    pub const fn new(uuid: Uuid) -> Self {
        Self {
            uuid,
            category: None,
        }
    }

    /// Attach the product's category.
    #[must_use]
    pub const fn with_category(mut self, category: Uuid) -> Self {
        self.category = Some(category);
        self
    }
}

/// A product, a quantity and the unit price captured when it was added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItem<'a> {
    product: ProductRef,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a> LineItem<'a> {
    /// Creates a new line item.
    ///
    /// # Errors
    ///
    /// - [`LineItemError::ZeroQuantity`] when `quantity` is zero.
    /// - [`LineItemError::NegativePrice`] when `unit_price` is below zero.
    pub fn new(
        product: ProductRef,
        quantity: u32,
        unit_price: Money<'a, Currency>,
    ) -> Result<Self, LineItemError> {
        if quantity == 0 {
            return Err(LineItemError::ZeroQuantity);
        }

        if unit_price.to_minor_units() < 0 {
            return Err(LineItemError::NegativePrice);
        }

        Ok(Self {
            product,
            quantity,
            unit_price,
        })
    }

    /// The referenced product.
    pub const fn product(&self) -> ProductRef {
        self.product
    }

    /// Number of units ordered.
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of a single unit.
    pub const fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }
}
