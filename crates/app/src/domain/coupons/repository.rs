//! Coupons Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::coupons::CouponCode;
use uuid::Uuid;

use crate::{
    database::{bind_amount, bind_count, try_get_amount, try_get_count},
    domain::{
        coupons::{
            data::NewCoupon,
            records::{CouponRecord, CouponUuid, CouponValue},
        },
        products::records::{CategoryUuid, ProductUuid},
    },
};

const CREATE_COUPON_SQL: &str = include_str!("sql/create_coupon.sql");
const GET_COUPON_SQL: &str = include_str!("sql/get_coupon.sql");
const LIST_COUPONS_SQL: &str = include_str!("sql/list_coupons.sql");
const LOCK_COUPON_SQL: &str = include_str!("sql/lock_coupon.sql");
const DEACTIVATE_COUPON_SQL: &str = include_str!("sql/deactivate_coupon.sql");
const INCREMENT_USAGE_SQL: &str = include_str!("sql/increment_usage.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: NewCoupon,
    ) -> Result<CouponRecord, sqlx::Error> {
        let products: Vec<Uuid> = coupon.products.iter().map(|p| p.into_uuid()).collect();
        let categories: Vec<Uuid> = coupon.categories.iter().map(|c| c.into_uuid()).collect();

        query_as::<Postgres, CouponRecord>(CREATE_COUPON_SQL)
            .bind(coupon.uuid.into_uuid())
            .bind(coupon.code.as_str())
            .bind(coupon.value.kind_as_str())
            .bind(bind_amount(coupon.value.value())?)
            .bind(bind_amount(coupon.min_order_amount)?)
            .bind(bind_amount(coupon.max_discount)?)
            .bind(SqlxTimestamp::from(coupon.valid_from))
            .bind(SqlxTimestamp::from(coupon.valid_until))
            .bind(bind_count(coupon.usage_limit)?)
            .bind(products)
            .bind(categories)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &CouponCode,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(GET_COUPON_SQL)
            .bind(code.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(LIST_COUPONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Load a coupon and hold its row lock until the transaction ends.
    pub(crate) async fn lock_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &CouponCode,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(LOCK_COUPON_SQL)
            .bind(code.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn deactivate_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &CouponCode,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(DEACTIVATE_COUPON_SQL)
            .bind(code.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns the number of rows updated; zero when the limit is reached.
    pub(crate) async fn increment_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_USAGE_SQL)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;
        let value = try_get_amount(row, "value")?;

        let value =
            CouponValue::from_parts(&kind, value).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: format!("unknown coupon kind {kind:?} with value {value}").into(),
            })?;

        Ok(Self {
            uuid: CouponUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            value,
            min_order_amount: try_get_amount(row, "min_order_amount")?,
            max_discount: try_get_amount(row, "max_discount")?,
            valid_from: row.try_get::<SqlxTimestamp, _>("valid_from")?.to_jiff(),
            valid_until: row.try_get::<SqlxTimestamp, _>("valid_until")?.to_jiff(),
            usage_limit: try_get_count(row, "usage_limit")?,
            used_count: try_get_count(row, "used_count")?,
            products: row
                .try_get::<Vec<Uuid>, _>("product_uuids")?
                .into_iter()
                .map(ProductUuid::from_uuid)
                .collect(),
            categories: row
                .try_get::<Vec<Uuid>, _>("category_uuids")?
                .into_iter()
                .map(CategoryUuid::from_uuid)
                .collect(),
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
