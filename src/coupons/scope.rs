//! Coupon Scope

use uuid::Uuid;

use crate::items::ProductRef;

/// Products and categories a coupon is restricted to.
///
/// An empty scope applies to every order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponScope {
    /// Products the coupon applies to
    pub products: Vec<Uuid>,

    /// Categories the coupon applies to
    pub categories: Vec<Uuid>,
}

impl CouponScope {
    /// A scope that applies to every order.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            products: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Restrict the coupon to the given products.
    #[must_use]
    pub fn with_products(mut self, products: impl IntoIterator<Item = Uuid>) -> Self {
        self.products.extend(products);
        self
    }

    /// Restrict the coupon to the given categories.
    #[must_use]
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Uuid>) -> Self {
        self.categories.extend(categories);
        self
    }

    /// Whether any restriction is configured.
    pub fn is_restricted(&self) -> bool {
        !self.products.is_empty() || !self.categories.is_empty()
    }

    /// Whether at least one of `products` is covered by this scope.
    pub fn applies_to(&self, products: &[ProductRef]) -> bool {
        if !self.is_restricted() {
            return true;
        }

        products.iter().any(|product| {
            self.products.contains(&product.uuid)
                || product
                    .category
                    .is_some_and(|category| self.categories.contains(&category))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrestricted_scope_applies_to_anything() {
        let scope = CouponScope::unrestricted();

        assert!(!scope.is_restricted());
        assert!(scope.applies_to(&[]));
        assert!(scope.applies_to(&[ProductRef::new(Uuid::now_v7())]));
    }

    #[test]
    fn product_scope_matches_listed_product() {
        let included = Uuid::now_v7();
        let scope = CouponScope::unrestricted().with_products([included]);

        assert!(scope.applies_to(&[
            ProductRef::new(Uuid::now_v7()),
            ProductRef::new(included),
        ]));
        assert!(!scope.applies_to(&[ProductRef::new(Uuid::now_v7())]));
    }

    #[test]
    fn category_scope_matches_product_category() {
        let category = Uuid::now_v7();
        let scope = CouponScope::unrestricted().with_categories([category]);

        assert!(scope.applies_to(&[ProductRef::new(Uuid::now_v7()).with_category(category)]));
        assert!(!scope.applies_to(&[ProductRef::new(Uuid::now_v7())]));
    }

    #[test]
    fn restricted_scope_never_matches_empty_order() {
        let scope = CouponScope::unrestricted().with_categories([Uuid::now_v7()]);

        assert!(!scope.applies_to(&[]));
    }
}
