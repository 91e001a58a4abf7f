//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sqlx::{Postgres, Transaction};
use storefront::{
    coupons::{CouponCode, CouponRejection},
    items::LineItem,
    orders::{OrderStatus, OrderTotals, PaymentStatus},
    shipping::ShippingRates,
};
use tracing::{info, warn};

use crate::{
    amounts::{from_money, to_money},
    database::Db,
    domain::{
        coupons::{records::CouponRecord, repository::PgCouponsRepository},
        orders::{
            data::{NewOrder, NewOrderItem, OrderDraft},
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        products::{
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        users::records::UserUuid,
    },
};

/// Total quantity requested per product, in first-seen order.
fn requested_quantities(items: &[NewOrderItem]) -> SmallVec<[(ProductUuid, u64); 8]> {
    let mut requested: SmallVec<[(ProductUuid, u64); 8]> = SmallVec::new();

    for item in items {
        match requested.iter_mut().find(|(product, _)| *product == item.product) {
            Some((_, quantity)) => *quantity += u64::from(item.quantity),
            None => requested.push((item.product, u64::from(item.quantity))),
        }
    }

    requested
}

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    rates: ShippingRates<'static>,
    orders: PgOrdersRepository,
    products: PgProductsRepository,
    coupons: PgCouponsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, rates: ShippingRates<'static>) -> Self {
        Self {
            db,
            rates,
            orders: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
            coupons: PgCouponsRepository::new(),
        }
    }

    async fn lock_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<CouponRecord, OrdersServiceError> {
        let code = CouponCode::parse(code)?;

        self.coupons
            .lock_coupon(tx, &code)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => OrdersServiceError::CouponNotFound,
                other => other.into(),
            })
    }

    async fn restock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[OrderItemRecord],
    ) -> Result<(), OrdersServiceError> {
        for item in items {
            self.products
                .increment_stock(tx, item.product, u64::from(item.quantity))
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if order.items.is_empty() {
            return Err(OrdersServiceError::NoItems);
        }

        let currency = self.rates.currency();
        let requested = requested_quantities(&order.items);
        let product_uuids: SmallVec<[ProductUuid; 8]> =
            requested.iter().map(|(product, _)| *product).collect();

        let mut tx = self.db.begin().await?;

        let products: FxHashMap<ProductUuid, ProductRecord> = self
            .products
            .lock_products(&mut tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        for (uuid, quantity) in &requested {
            let product = products
                .get(uuid)
                .ok_or(OrdersServiceError::ProductNotFound(*uuid))?;

            if *quantity > product.stock {
                return Err(OrdersServiceError::InsufficientStock {
                    product: *uuid,
                    requested: *quantity,
                    available: product.stock,
                });
            }
        }

        let mut line_items = Vec::with_capacity(order.items.len());
        let mut item_records = Vec::with_capacity(order.items.len());

        for item in &order.items {
            let product = products
                .get(&item.product)
                .ok_or(OrdersServiceError::ProductNotFound(item.product))?;

            if let Some(price) = item.price
                && price != product.price
            {
                warn!(
                    product = %item.product,
                    submitted = price,
                    catalogue = product.price,
                    "submitted price differs from catalogue; charging catalogue price"
                );
            }

            line_items.push(LineItem::new(
                product.product_ref(),
                item.quantity,
                to_money(product.price, currency)?,
            )?);

            item_records.push(OrderItemRecord {
                uuid: OrderItemUuid::new(),
                product: item.product,
                quantity: item.quantity,
                unit_price: product.price,
            });
        }

        let coupon_record = match order.coupon_code.as_deref() {
            Some(code) => Some(self.lock_coupon(&mut tx, code).await?),
            None => None,
        };

        let coupon = coupon_record
            .as_ref()
            .map(|record| record.to_coupon(currency))
            .transpose()?;

        let totals = OrderTotals::assemble(
            &line_items,
            coupon.as_ref(),
            &self.rates,
            order.shipping_method,
            &order.shipping_address,
            now,
        )?;

        // A coupon that discounts nothing is neither recorded nor redeemed.
        let coupon_record = coupon_record.filter(|_| !totals.discount.amount.is_zero());

        let estimated_delivery =
            self.rates
                .estimated_delivery(order.shipping_method, &order.shipping_address, now)?;

        let draft = OrderDraft {
            uuid: order.uuid,
            user,
            coupon: coupon_record.as_ref().map(|record| record.uuid),
            coupon_code: coupon_record.as_ref().map(|record| record.code.clone()),
            currency: currency.iso_alpha_code,
            subtotal: from_money(&totals.subtotal)?,
            discount_amount: from_money(&totals.discount.amount)?,
            discount_percentage: totals.discount.percentage,
            shipping_method: order.shipping_method,
            shipping_cost: from_money(&totals.shipping_cost)?,
            shipping_address: order.shipping_address,
            total: from_money(&totals.total)?,
            payment_method: order.payment_method,
            estimated_delivery,
        };

        let mut created = self.orders.create_order(&mut tx, &draft).await?;

        for (position, item) in (0_u32..).zip(&item_records) {
            self.orders
                .create_order_item(&mut tx, created.uuid, position, item)
                .await?;
        }

        created.items = item_records;

        for (uuid, quantity) in &requested {
            let rows_affected = self
                .products
                .decrement_stock(&mut tx, *uuid, *quantity)
                .await?;

            if rows_affected == 0 {
                return Err(OrdersServiceError::InsufficientStock {
                    product: *uuid,
                    requested: *quantity,
                    available: products.get(uuid).map_or(0, |product| product.stock),
                });
            }
        }

        if let Some(record) = &coupon_record {
            let rows_affected = self.coupons.increment_usage(&mut tx, record.uuid).await?;

            if rows_affected == 0 {
                return Err(OrdersServiceError::CouponRejected(
                    CouponRejection::UsageExhausted,
                ));
            }
        }

        tx.commit().await?;

        info!(
            order = %created.uuid,
            user = %user,
            total = created.total,
            coupon = created.coupon_code.as_deref().unwrap_or("-"),
            "order created"
        );

        Ok(created)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.orders.get_order(&mut tx, user, order).await?;

        self.orders
            .load_items(&mut tx, std::slice::from_mut(&mut order))
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.orders.list_orders(&mut tx, user).await?;

        self.orders.load_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        next: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut current = self.orders.lock_order(&mut tx, order).await?;

        if !current.status.can_transition_to(next) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status.as_str(),
                to: next.as_str(),
            });
        }

        self.orders
            .load_items(&mut tx, std::slice::from_mut(&mut current))
            .await?;

        if next == OrderStatus::Cancelled {
            self.restock(&mut tx, &current.items).await?;
        }

        let mut updated = self.orders.update_status(&mut tx, order, next).await?;
        updated.items = current.items;

        tx.commit().await?;

        info!(order = %order, from = %current.status, to = %next, "order status updated");

        Ok(updated)
    }

    async fn update_payment_status(
        &self,
        order: OrderUuid,
        next: PaymentStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut current = self.orders.lock_order(&mut tx, order).await?;

        if !current.payment_status.can_transition_to(next) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.payment_status.as_str(),
                to: next.as_str(),
            });
        }

        self.orders
            .load_items(&mut tx, std::slice::from_mut(&mut current))
            .await?;

        let mut updated = self
            .orders
            .update_payment_status(&mut tx, order, next)
            .await?;
        updated.items = current.items;

        tx.commit().await?;

        info!(
            order = %order,
            from = %current.payment_status,
            to = %next,
            "payment status updated"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Price and place an order.
    ///
    /// The order insert, stock decrements and coupon usage increment commit
    /// together or not at all.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve one of the user's orders.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve the user's orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move an order to the next fulfilment status.
    async fn update_status(
        &self,
        order: OrderUuid,
        next: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Move an order to the next payment status.
    async fn update_payment_status(
        &self,
        order: OrderUuid,
        next: PaymentStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use storefront::{
        coupons::CouponRejection,
        shipping::{ShippingAddress, ShippingMethod},
    };
    use testresult::TestResult;

    use crate::{
        domain::{
            coupons::{CouponsService, records::CouponValue},
            products::ProductsService,
        },
        test::{
            TestContext,
            helpers::{create_product, domestic_address, new_coupon, new_order},
        },
    };

    use super::*;

    #[test]
    fn requested_quantities_merges_repeated_products() {
        let a = ProductUuid::new();
        let b = ProductUuid::new();

        let items = [
            NewOrderItem { product: a, quantity: 2, price: None },
            NewOrderItem { product: b, quantity: 1, price: None },
            NewOrderItem { product: a, quantity: 3, price: None },
        ];

        assert_eq!(requested_quantities(&items).as_slice(), &[(a, 5), (b, 1)]);
    }

    #[tokio::test]
    async fn create_order_applies_coupon_and_shipping() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 100_000, 5).await?;

        ctx.coupons
            .create_coupon(new_coupon("TEST20", CouponValue::Percentage(20))?)
            .await?;

        let mut order = new_order(&[(product.uuid, 1)]);
        order.coupon_code = Some("test20".to_string());

        let created = ctx
            .orders
            .create_order(ctx.user, order, Timestamp::now())
            .await?;

        assert_eq!(created.subtotal, 100_000);
        assert_eq!(created.discount_amount, 20_000);
        assert_eq!(created.discount_percentage, 20);
        assert_eq!(created.shipping_cost, 500);
        assert_eq!(created.total, 80_500);
        assert_eq!(created.coupon_code.as_deref(), Some("TEST20"));
        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.payment_status, PaymentStatus::Pending);
        assert_eq!(created.items.len(), 1);

        let coupon = ctx.coupons.get_coupon("TEST20").await?;
        assert_eq!(coupon.used_count, 1);

        let product = ctx.products.get_product(product.uuid).await?;
        assert_eq!(product.stock, 4);

        Ok(())
    }

    #[tokio::test]
    async fn create_order_charges_catalogue_price() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 2_500, 10).await?;

        let mut order = new_order(&[(product.uuid, 2)]);
        if let Some(item) = order.items.first_mut() {
            item.price = Some(1);
        }

        let created = ctx
            .orders
            .create_order(ctx.user, order, Timestamp::now())
            .await?;

        assert_eq!(created.subtotal, 5_000);
        assert_eq!(created.items.first().map(|i| i.unit_price), Some(2_500));

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_stock_creates_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 1_000, 2).await?;

        let result = ctx
            .orders
            .create_order(ctx.user, new_order(&[(product.uuid, 2), (product.uuid, 1)]), Timestamp::now())
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InsufficientStock {
                    requested: 3,
                    available: 2,
                    ..
                })
            ),
            "expected InsufficientStock, got {result:?}"
        );

        let orders = ctx.orders.list_orders(ctx.user).await?;
        assert!(orders.is_empty());

        let product = ctx.products.get_product(product.uuid).await?;
        assert_eq!(product.stock, 2);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let ctx = TestContext::new().await;
        let missing = ProductUuid::new();

        let result = ctx
            .orders
            .create_order(ctx.user, new_order(&[(missing, 1)]), Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::ProductNotFound(uuid)) if uuid == missing),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_coupon_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 1_000, 1).await?;

        let mut order = new_order(&[(product.uuid, 1)]);
        order.coupon_code = Some("GHOST".to_string());

        let result = ctx
            .orders
            .create_order(ctx.user, order, Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::CouponNotFound)),
            "expected CouponNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn coupon_below_minimum_discounts_nothing_and_is_not_redeemed() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 5_000, 3).await?;

        let mut coupon = new_coupon("MIN100", CouponValue::Percentage(20))?;
        coupon.min_order_amount = 10_000;
        ctx.coupons.create_coupon(coupon).await?;

        let mut order = new_order(&[(product.uuid, 1)]);
        order.coupon_code = Some("MIN100".to_string());

        let created = ctx
            .orders
            .create_order(ctx.user, order, Timestamp::now())
            .await?;

        assert_eq!(created.discount_amount, 0);
        assert_eq!(created.total, 5_500);
        assert_eq!(created.coupon_code, None);
        assert_eq!(ctx.coupons.get_coupon("MIN100").await?.used_count, 0);

        let product = ctx.products.get_product(product.uuid).await?;
        assert_eq!(product.stock, 2);

        Ok(())
    }

    #[tokio::test]
    async fn expired_coupon_is_rejected_and_creates_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 5_000, 3).await?;

        let mut coupon = new_coupon("OLD", CouponValue::Fixed(1_000))?;
        coupon.valid_until = Timestamp::now().checked_sub(jiff::SignedDuration::from_mins(1))?;
        coupon.valid_from = coupon.valid_until.checked_sub(jiff::SignedDuration::from_hours(1))?;
        ctx.coupons.create_coupon(coupon).await?;

        let mut order = new_order(&[(product.uuid, 1)]);
        order.coupon_code = Some("OLD".to_string());

        let result = ctx
            .orders
            .create_order(ctx.user, order, Timestamp::now())
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::CouponRejected(CouponRejection::Expired))
            ),
            "expected Expired, got {result:?}"
        );

        assert_eq!(ctx.coupons.get_coupon("OLD").await?.used_count, 0);

        let product = ctx.products.get_product(product.uuid).await?;
        assert_eq!(product.stock, 3);

        Ok(())
    }

    #[tokio::test]
    async fn single_use_coupon_is_redeemed_once() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 5_000, 5).await?;

        let mut coupon = new_coupon("ONCE", CouponValue::Fixed(1_000))?;
        coupon.usage_limit = 1;
        ctx.coupons.create_coupon(coupon).await?;

        let mut first = new_order(&[(product.uuid, 1)]);
        first.coupon_code = Some("ONCE".to_string());

        let created = ctx
            .orders
            .create_order(ctx.user, first, Timestamp::now())
            .await?;

        assert_eq!(created.discount_amount, 1_000);

        let mut second = new_order(&[(product.uuid, 1)]);
        second.coupon_code = Some("ONCE".to_string());

        let result = ctx
            .orders
            .create_order(ctx.user, second, Timestamp::now())
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::CouponRejected(CouponRejection::UsageExhausted))
            ),
            "expected UsageExhausted, got {result:?}"
        );

        assert_eq!(ctx.coupons.get_coupon("ONCE").await?.used_count, 1);
        assert_eq!(ctx.orders.list_orders(ctx.user).await?.len(), 1);

        let product = ctx.products.get_product(product.uuid).await?;
        assert_eq!(product.stock, 4);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_orders_for_last_unit_sell_it_once() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 1_000, 1).await?;

        let (a, b) = tokio::join!(
            ctx.orders
                .create_order(ctx.user, new_order(&[(product.uuid, 1)]), Timestamp::now()),
            ctx.orders
                .create_order(ctx.user, new_order(&[(product.uuid, 1)]), Timestamp::now()),
        );

        assert_eq!(
            [&a, &b].iter().filter(|result| result.is_ok()).count(),
            1,
            "expected exactly one order, got {a:?} and {b:?}"
        );
        assert!(
            [&a, &b].iter().any(|result| matches!(
                result,
                Err(OrdersServiceError::InsufficientStock { available: 0, .. })
            )),
            "expected the loser to see no stock, got {a:?} and {b:?}"
        );

        assert_eq!(ctx.orders.list_orders(ctx.user).await?.len(), 1);

        let product = ctx.products.get_product(product.uuid).await?;
        assert_eq!(product.stock, 0);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_orders_share_single_use_coupon_once() -> TestResult {
        let ctx = TestContext::new().await;
        let first = create_product(&ctx, ProductUuid::new(), 5_000, 5).await?;
        let second = create_product(&ctx, ProductUuid::new(), 5_000, 5).await?;

        let mut coupon = new_coupon("RACE", CouponValue::Fixed(1_000))?;
        coupon.usage_limit = 1;
        ctx.coupons.create_coupon(coupon).await?;

        let mut a = new_order(&[(first.uuid, 1)]);
        a.coupon_code = Some("RACE".to_string());

        let mut b = new_order(&[(second.uuid, 1)]);
        b.coupon_code = Some("RACE".to_string());

        let (a, b) = tokio::join!(
            ctx.orders.create_order(ctx.user, a, Timestamp::now()),
            ctx.orders.create_order(ctx.user, b, Timestamp::now()),
        );

        assert_eq!(
            [&a, &b].iter().filter(|result| result.is_ok()).count(),
            1,
            "expected exactly one order, got {a:?} and {b:?}"
        );
        assert_eq!(ctx.coupons.get_coupon("RACE").await?.used_count, 1);

        let stock = ctx.products.get_product(first.uuid).await?.stock
            + ctx.products.get_product(second.uuid).await?.stock;
        assert_eq!(stock, 9);

        Ok(())
    }

    #[tokio::test]
    async fn guarded_updates_stop_at_their_limits() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 1_000, 2).await?;

        let mut coupon = new_coupon("EDGE", CouponValue::Fixed(100))?;
        coupon.usage_limit = 1;
        let coupon = ctx.coupons.create_coupon(coupon).await?;

        let mut tx = ctx.orders.db.begin().await?;

        assert_eq!(ctx.orders.products.decrement_stock(&mut tx, product.uuid, 3).await?, 0);
        assert_eq!(ctx.orders.products.decrement_stock(&mut tx, product.uuid, 2).await?, 1);
        assert_eq!(ctx.orders.products.decrement_stock(&mut tx, product.uuid, 1).await?, 0);

        assert_eq!(ctx.orders.coupons.increment_usage(&mut tx, coupon.uuid).await?, 1);
        assert_eq!(ctx.orders.coupons.increment_usage(&mut tx, coupon.uuid).await?, 0);

        tx.rollback().await?;

        assert_eq!(ctx.products.get_product(product.uuid).await?.stock, 2);
        assert_eq!(ctx.coupons.get_coupon("EDGE").await?.used_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn international_order_pays_surcharge() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 10_000, 1).await?;

        let mut order = new_order(&[(product.uuid, 1)]);
        order.shipping_method = ShippingMethod::Priority;
        order.shipping_address = ShippingAddress {
            country: "Singapore".to_string(),
            ..domestic_address()
        };

        let created = ctx
            .orders
            .create_order(ctx.user, order, Timestamp::now())
            .await?;

        assert_eq!(created.shipping_cost, 4_500);
        assert_eq!(created.total, 14_500);
        assert_eq!(created.shipping_address.country, "Singapore");

        Ok(())
    }

    #[tokio::test]
    async fn orders_are_private_to_their_user() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 1_000, 5).await?;

        let created = ctx
            .orders
            .create_order(ctx.user, new_order(&[(product.uuid, 1)]), Timestamp::now())
            .await?;

        let fetched = ctx.orders.get_order(ctx.user, created.uuid).await?;
        assert_eq!(fetched.uuid, created.uuid);
        assert_eq!(fetched.items, created.items);

        let other = UserUuid::new();
        let result = ctx.orders.get_order(other, created.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert!(ctx.orders.list_orders(other).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn status_moves_forward_and_rejects_skips() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 1_000, 5).await?;

        let created = ctx
            .orders
            .create_order(ctx.user, new_order(&[(product.uuid, 1)]), Timestamp::now())
            .await?;

        let result = ctx
            .orders
            .update_status(created.uuid, OrderStatus::Delivered)
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidTransition {
                    from: "pending",
                    to: "delivered"
                })
            ),
            "expected InvalidTransition, got {result:?}"
        );

        let processing = ctx
            .orders
            .update_status(created.uuid, OrderStatus::Processing)
            .await?;

        assert_eq!(processing.status, OrderStatus::Processing);
        assert_eq!(processing.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn cancelling_returns_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 1_000, 5).await?;

        let created = ctx
            .orders
            .create_order(ctx.user, new_order(&[(product.uuid, 3)]), Timestamp::now())
            .await?;

        let cancelled = ctx
            .orders
            .update_status(created.uuid, OrderStatus::Cancelled)
            .await?;

        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let product = ctx.products.get_product(product.uuid).await?;
        assert_eq!(product.stock, 5);

        Ok(())
    }

    #[tokio::test]
    async fn failed_payment_can_be_retried() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, ProductUuid::new(), 1_000, 5).await?;

        let created = ctx
            .orders
            .create_order(ctx.user, new_order(&[(product.uuid, 1)]), Timestamp::now())
            .await?;

        ctx.orders
            .update_payment_status(created.uuid, PaymentStatus::Failed)
            .await?;

        let paid = ctx
            .orders
            .update_payment_status(created.uuid, PaymentStatus::Paid)
            .await?;

        assert_eq!(paid.payment_status, PaymentStatus::Paid);

        let result = ctx
            .orders
            .update_payment_status(created.uuid, PaymentStatus::Failed)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidTransition { .. })),
            "expected InvalidTransition, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_order_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .update_status(OrderUuid::new(), OrderStatus::Processing)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
