//! Test Helpers

use jiff::{SignedDuration, Timestamp};
use storefront::{
    coupons::CouponCode,
    shipping::{ShippingAddress, ShippingMethod},
};
use testresult::TestResult;

use crate::{
    domain::{
        coupons::{
            data::NewCoupon,
            records::{CouponUuid, CouponValue},
        },
        orders::{
            data::{NewOrder, NewOrderItem},
            records::OrderUuid,
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{CategoryUuid, ProductRecord, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    product: ProductUuid,
    price: u64,
    stock: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: product,
            name: format!("Product {product}"),
            price,
            stock,
            category: None,
        })
        .await
}

pub(crate) async fn create_categorised_product(
    ctx: &TestContext,
    price: u64,
    category: Option<CategoryUuid>,
) -> Result<ProductRecord, ProductsServiceError> {
    let uuid = ProductUuid::new();

    ctx.products
        .create_product(NewProduct {
            uuid,
            name: format!("Product {uuid}"),
            price,
            stock: 10,
            category,
        })
        .await
}

/// Active coupon, valid from an hour ago for thirty days, usable 100 times.
pub(crate) fn new_coupon(code: &str, value: CouponValue) -> TestResult<NewCoupon> {
    let now = Timestamp::now();

    Ok(NewCoupon {
        uuid: CouponUuid::new(),
        code: CouponCode::parse(code)?,
        value,
        min_order_amount: 0,
        max_discount: 0,
        valid_from: now.checked_sub(SignedDuration::from_hours(1))?,
        valid_until: now.checked_add(SignedDuration::from_hours(30 * 24))?,
        usage_limit: 100,
        products: Vec::new(),
        categories: Vec::new(),
    })
}

pub(crate) fn domestic_address() -> ShippingAddress {
    ShippingAddress {
        name: "Asha Rao".to_string(),
        street: "12 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        postal_code: "560001".to_string(),
        country: "India".to_string(),
        phone: None,
    }
}

/// Standard-shipped, domestic order for `(product, quantity)` lines.
pub(crate) fn new_order(lines: &[(ProductUuid, u32)]) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        items: lines
            .iter()
            .map(|&(product, quantity)| NewOrderItem {
                product,
                quantity,
                price: None,
            })
            .collect(),
        coupon_code: None,
        shipping_address: domestic_address(),
        shipping_method: ShippingMethod::Standard,
        payment_method: "card".to_string(),
    }
}
