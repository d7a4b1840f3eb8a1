//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::{
    checkout::PaymentMethod,
    orders::OrderStatus,
    shipping::{Address, PostalCode},
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::{amount_param, try_get_amount, try_get_count},
    domain::{
        carts::records::CartUuid,
        customers::records::CustomerUuid,
        orders::{
            data::{NewOrder, NewOrderLine, OrderFilter},
            records::{
                OrderLineRecord, OrderLineUuid, OrderRecord, OrderStats, OrderUuid,
                ShippingSelection,
            },
        },
        products::records::{ProductUuid, VariantUuid},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const INSERT_ORDER_LINES_SQL: &str = include_str!("sql/insert_order_lines.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_CUSTOMER_ORDERS_SQL: &str = include_str!("sql/list_customer_orders.sql");
const LIST_ORDER_LINES_SQL: &str = include_str!("sql/list_order_lines.sql");
const TAKE_STOCK_SQL: &str = include_str!("sql/take_stock.sql");
const RESTOCK_ORDER_SQL: &str = include_str!("sql/restock_order.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const SET_PAYMENT_SESSION_SQL: &str = include_str!("sql/set_payment_session.sql");
const ORDER_STATS_SQL: &str = include_str!("sql/order_stats.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "orders.repository.create_order",
        skip(self, tx, order),
        fields(
            order_uuid = %order.uuid,
            customer_uuid = %order.customer_uuid,
            line_count = order.lines.len()
        ),
        err
    )]
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        let customer = &order.customer;
        let address = &customer.address;

        let mut record = query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.customer_uuid.into_uuid())
            .bind(order.cart_uuid.map(CartUuid::into_uuid))
            .bind(&customer.email)
            .bind(&customer.full_name)
            .bind(&customer.document)
            .bind(&customer.phone)
            .bind(address.postal_code.as_str())
            .bind(&address.street)
            .bind(&address.number)
            .bind(&address.complement)
            .bind(&address.neighborhood)
            .bind(&address.city)
            .bind(&address.state)
            .bind(int_param(order.shipping.service_id, "shipping_service_id")?)
            .bind(&order.shipping.name)
            .bind(&order.shipping.company)
            .bind(int_param(order.shipping.delivery_days, "shipping_delivery_days")?)
            .bind(amount_param(order.shipping_cost, "shipping_cost")?)
            .bind(amount_param(order.subtotal, "subtotal")?)
            .bind(amount_param(order.total_before_cashback, "total_before_cashback")?)
            .bind(amount_param(order.applied_cashback, "applied_cashback")?)
            .bind(amount_param(order.final_total, "final_total")?)
            .bind(order.payment_method.as_str())
            .fetch_one(&mut **tx)
            .await?;

        record.lines = self.insert_lines(tx, order.uuid, &order.lines).await?;

        Ok(record)
    }

    async fn insert_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: &[NewOrderLine],
    ) -> Result<Vec<OrderLineRecord>, sqlx::Error> {
        let records: Vec<OrderLineRecord> = lines
            .iter()
            .map(|line| OrderLineRecord {
                uuid: OrderLineUuid::new(),
                order_uuid: order,
                product_uuid: line.product_uuid,
                variant_uuid: line.variant_uuid,
                name: line.name.clone(),
                variant_description: line.variant_description.clone(),
                image_url: line.image_url.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect();

        let uuids: Vec<Uuid> = records.iter().map(|l| l.uuid.into_uuid()).collect();
        let order_uuids = vec![order.into_uuid(); records.len()];
        let product_uuids: Vec<Uuid> = records.iter().map(|l| l.product_uuid.into_uuid()).collect();
        let variant_uuids: Vec<Option<Uuid>> = records
            .iter()
            .map(|l| l.variant_uuid.map(VariantUuid::into_uuid))
            .collect();
        let names: Vec<&str> = records.iter().map(|l| l.name.as_str()).collect();
        let descriptions: Vec<&str> = records
            .iter()
            .map(|l| l.variant_description.as_str())
            .collect();
        let image_urls: Vec<Option<&str>> = records.iter().map(|l| l.image_url.as_deref()).collect();
        let unit_prices: Vec<i64> = records
            .iter()
            .map(|l| amount_param(l.unit_price, "unit_price"))
            .collect::<Result<_, _>>()?;
        let quantities: Vec<i32> = records
            .iter()
            .map(|l| int_param(l.quantity, "quantity"))
            .collect::<Result<_, _>>()?;

        query(INSERT_ORDER_LINES_SQL)
            .bind(&uuids)
            .bind(&order_uuids)
            .bind(&product_uuids)
            .bind(&variant_uuids)
            .bind(&names)
            .bind(&descriptions)
            .bind(&image_urls)
            .bind(&unit_prices)
            .bind(&quantities)
            .execute(&mut **tx)
            .await?;

        Ok(records)
    }

    /// Take `quantity` units of a variant; returns `false` when not enough
    /// are in stock.
    pub(crate) async fn take_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variant: VariantUuid,
        quantity: u32,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(TAKE_STOCK_SQL)
            .bind(variant.into_uuid())
            .bind(product.into_uuid())
            .bind(int_param(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    /// Return the variant units of an order to stock.
    pub(crate) async fn restock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RESTOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        debug!(variants = rows_affected, "restocked order");

        Ok(rows_affected)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let record = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.single_with_lines(tx, record).await
    }

    /// Read an order and hold its row lock until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let record = query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.single_with_lines(tx, record).await
    }

    #[tracing::instrument(
        name = "orders.repository.list_orders",
        skip(self, tx),
        fields(order_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &OrderFilter,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty());

        let mut orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(search)
            .bind(i64::from(filter.limit))
            .fetch_all(&mut **tx)
            .await?;

        self.attach_lines(tx, &mut orders).await?;

        tracing::Span::current().record("order_count", orders.len());

        Ok(orders)
    }

    pub(crate) async fn list_customer_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let mut orders = query_as::<Postgres, OrderRecord>(LIST_CUSTOMER_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.attach_lines(tx, &mut orders).await?;

        Ok(orders)
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn set_payment_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        session_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PAYMENT_SESSION_SQL)
            .bind(order.into_uuid())
            .bind(session_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn order_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<OrderStats, sqlx::Error> {
        query_as::<Postgres, OrderStats>(ORDER_STATS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    async fn single_with_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: OrderRecord,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut orders = vec![record];

        self.attach_lines(tx, &mut orders).await?;

        orders.pop().ok_or(sqlx::Error::RowNotFound)
    }

    async fn attach_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = orders.iter().map(|o| o.uuid.into_uuid()).collect();

        let lines = query_as::<Postgres, OrderLineRecord>(LIST_ORDER_LINES_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_order: FxHashMap<OrderUuid, Vec<OrderLineRecord>> = FxHashMap::default();

        for line in lines {
            by_order.entry(line.order_uuid).or_default().push(line);
        }

        for order in orders.iter_mut() {
            order.lines = by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

fn int_param(value: u32, col: &str) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn decode_error(col: &str, source: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let postal_code: String = row.try_get("postal_code")?;
        let payment_method: String = row.try_get("payment_method")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            cart_uuid: row
                .try_get::<Option<Uuid>, _>("cart_uuid")?
                .map(CartUuid::from_uuid),
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            document: row.try_get("document")?,
            phone: row.try_get("phone")?,
            address: Address {
                postal_code: PostalCode::parse(&postal_code)
                    .map_err(|e| decode_error("postal_code", e))?,
                street: row.try_get("street")?,
                number: row.try_get("number")?,
                complement: row.try_get("complement")?,
                neighborhood: row.try_get("neighborhood")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
            },
            shipping: ShippingSelection {
                service_id: try_get_count(row, "shipping_service_id")?,
                name: row.try_get("shipping_name")?,
                company: row.try_get("shipping_company")?,
                delivery_days: try_get_count(row, "shipping_delivery_days")?,
            },
            shipping_cost: try_get_amount(row, "shipping_cost")?,
            subtotal: try_get_amount(row, "subtotal")?,
            total_before_cashback: try_get_amount(row, "total_before_cashback")?,
            applied_cashback: try_get_amount(row, "applied_cashback")?,
            final_total: try_get_amount(row, "final_total")?,
            payment_method: payment_method
                .parse::<PaymentMethod>()
                .map_err(|e| decode_error("payment_method", e))?,
            payment_session_id: row.try_get("payment_session_id")?,
            status: status
                .parse::<OrderStatus>()
                .map_err(|e| decode_error("status", e))?,
            lines: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            variant_uuid: row
                .try_get::<Option<Uuid>, _>("variant_uuid")?
                .map(VariantUuid::from_uuid),
            name: row.try_get("name")?,
            variant_description: row.try_get("variant_description")?,
            image_url: row.try_get("image_url")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_count(row, "quantity")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderStats {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            total_orders: try_get_amount(row, "total_orders")?,
            processing_orders: try_get_amount(row, "processing_orders")?,
            paid_orders: try_get_amount(row, "paid_orders")?,
            total_customers: try_get_amount(row, "total_customers")?,
            total_products: try_get_amount(row, "total_products")?,
            total_cashback_credited: try_get_amount(row, "total_cashback_credited")?,
            total_revenue: try_get_amount(row, "total_revenue")?,
        })
    }
}
