//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};
use storefront::{
    orders::{OrderStatus, PaymentStatus},
    shipping::{ShippingAddress, ShippingMethod},
};
use uuid::Uuid;

use crate::{
    database::{bind_amount, bind_count, try_get_amount, try_get_count},
    domain::{
        coupons::records::CouponUuid,
        orders::{
            data::OrderDraft,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const UPDATE_PAYMENT_STATUS_SQL: &str = include_str!("sql/update_payment_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderDraft,
    ) -> Result<OrderRecord, sqlx::Error> {
        let discount_percentage = i16::try_from(order.discount_percentage)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user.into_uuid())
            .bind(order.coupon.map(CouponUuid::into_uuid))
            .bind(order.coupon_code.as_deref())
            .bind(order.currency)
            .bind(bind_amount(order.subtotal)?)
            .bind(bind_amount(order.discount_amount)?)
            .bind(discount_percentage)
            .bind(order.shipping_method.as_str())
            .bind(bind_amount(order.shipping_cost)?)
            .bind(Json(&order.shipping_address))
            .bind(bind_amount(order.total)?)
            .bind(order.payment_method.as_str())
            .bind(SqlxTimestamp::from(order.estimated_delivery))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        position: u32,
        item: &OrderItemRecord,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(item.product.into_uuid())
            .bind(bind_count(position)?)
            .bind(bind_count(item.quantity)?)
            .bind(bind_amount(item.unit_price)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Attach stored items to each order, in their original positions.
    pub(crate) async fn load_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = orders.iter().map(|o| o.uuid.into_uuid()).collect();

        let rows = query(GET_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut items: FxHashMap<Uuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for row in &rows {
            let order: Uuid = row.try_get("order_uuid")?;

            items.entry(order).or_default().push(OrderItemRecord {
                uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
                product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                quantity: try_get_count(row, "quantity")?,
                unit_price: try_get_amount(row, "unit_price")?,
            });
        }

        for order in orders {
            order.items = items.remove(&order.uuid.into_uuid()).unwrap_or_default();
        }

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Load an order and hold its row lock until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_payment_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: PaymentStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_PAYMENT_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(col)?;

    raw.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let discount_percentage: i16 = row.try_get("discount_percentage")?;

        let discount_percentage =
            u16::try_from(discount_percentage).map_err(|e| sqlx::Error::ColumnDecode {
                index: "discount_percentage".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            coupon: row
                .try_get::<Option<Uuid>, _>("coupon_uuid")?
                .map(CouponUuid::from_uuid),
            coupon_code: row.try_get("coupon_code")?,
            currency: row.try_get("currency")?,
            items: Vec::new(),
            subtotal: try_get_amount(row, "subtotal")?,
            discount_amount: try_get_amount(row, "discount_amount")?,
            discount_percentage,
            shipping_method: try_get_parsed::<ShippingMethod>(row, "shipping_method")?,
            shipping_cost: try_get_amount(row, "shipping_cost")?,
            shipping_address: row
                .try_get::<Json<ShippingAddress>, _>("shipping_address")?
                .0,
            total: try_get_amount(row, "total")?,
            status: try_get_parsed::<OrderStatus>(row, "status")?,
            payment_status: try_get_parsed::<PaymentStatus>(row, "payment_status")?,
            payment_method: row.try_get("payment_method")?,
            estimated_delivery: row
                .try_get::<SqlxTimestamp, _>("estimated_delivery")?
                .to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
