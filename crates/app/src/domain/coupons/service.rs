//! Coupons service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rusty_money::iso::Currency;
use storefront::coupons::{Coupon, CouponCode, CouponKind, UsageLimit, ValidityWindow};
use tracing::info;

use crate::{
    amounts::{from_money, to_money},
    database::Db,
    domain::{
        coupons::{
            data::{CouponValidation, NewCoupon},
            errors::CouponsServiceError,
            records::{CouponRecord, CouponValue},
            repository::PgCouponsRepository,
        },
        products::{records::ProductUuid, repository::PgProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    currency: &'static Currency,
    coupons: PgCouponsRepository,
    products: PgProductsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db, currency: &'static Currency) -> Self {
        Self {
            db,
            currency,
            coupons: PgCouponsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    /// Reject coupons the pricing core would refuse to build.
    fn check_new_coupon(&self, coupon: &NewCoupon) -> Result<(), CouponsServiceError> {
        let kind = match coupon.value {
            CouponValue::Percentage(points) => CouponKind::PercentageOff { points },
            CouponValue::Fixed(amount) => CouponKind::AmountOff(to_money(amount, self.currency)?),
        };

        to_money(coupon.min_order_amount, self.currency)?;
        to_money(coupon.max_discount, self.currency)?;

        Coupon::new(
            coupon.code.clone(),
            kind,
            ValidityWindow::new(coupon.valid_from, coupon.valid_until),
            UsageLimit::new(coupon.usage_limit),
        )?;

        Ok(())
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError> {
        self.check_new_coupon(&coupon)?;

        let mut tx = self.db.begin().await?;

        let created = self.coupons.create_coupon(&mut tx, coupon).await?;

        tx.commit().await?;

        info!(code = %created.code, kind = created.value.kind_as_str(), "coupon created");

        Ok(created)
    }

    async fn get_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError> {
        let code = CouponCode::parse(code)?;

        let mut tx = self.db.begin().await?;

        let coupon = self.coupons.get_coupon(&mut tx, &code).await?;

        tx.commit().await?;

        Ok(coupon)
    }

    async fn list_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupons = self.coupons.list_coupons(&mut tx).await?;

        tx.commit().await?;

        Ok(coupons)
    }

    async fn deactivate_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError> {
        let code = CouponCode::parse(code)?;

        let mut tx = self.db.begin().await?;

        let coupon = self.coupons.deactivate_coupon(&mut tx, &code).await?;

        tx.commit().await?;

        info!(code = %coupon.code, "coupon deactivated");

        Ok(coupon)
    }

    async fn validate_coupon(
        &self,
        code: &str,
        order_total: u64,
        order_products: Vec<ProductUuid>,
        now: Timestamp,
    ) -> Result<CouponValidation, CouponsServiceError> {
        let code = CouponCode::parse(code)?;

        let mut tx = self.db.begin().await?;

        let record = self.coupons.get_coupon(&mut tx, &code).await?;

        let products = self
            .products
            .list_product_refs(&mut tx, &order_products)
            .await?;

        tx.commit().await?;

        let coupon = record.to_coupon(self.currency)?;
        let order_total = to_money(order_total, self.currency)?;

        let rejection = coupon.check(&order_total, &products, now).err();
        let discount = coupon.calculate_discount(order_total, &products, now)?;

        Ok(CouponValidation {
            valid: rejection.is_none(),
            discount: from_money(&discount)?,
            rejection,
            coupon: record,
        })
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Creates a new coupon.
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError>;

    /// Retrieve a coupon by code. Codes are normalised before lookup.
    async fn get_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError>;

    /// Retrieve all coupons.
    async fn list_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError>;

    /// Switch a coupon off.
    async fn deactivate_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError>;

    /// Check a coupon against a prospective order and calculate its discount.
    async fn validate_coupon(
        &self,
        code: &str,
        order_total: u64,
        order_products: Vec<ProductUuid>,
        now: Timestamp,
    ) -> Result<CouponValidation, CouponsServiceError>;
}
