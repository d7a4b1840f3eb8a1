//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_count,
    domain::{
        carts::{
            data::{CartItemKey, NewCartItem},
            records::{CartItemRecord, CartItemUuid, CartUuid},
        },
        products::records::{ProductUuid, VariantUuid},
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const ADD_CART_ITEM_SQL: &str = include_str!("../sql/add_cart_item.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("../sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("../sql/clear_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert a line or add to the quantity of the existing line with the
    /// same product and variant. Fails with `RowNotFound` when the cart,
    /// product or variant does not exist.
    #[tracing::instrument(
        name = "carts.repository.add_cart_item",
        skip(self, tx, item),
        fields(
            cart_uuid = %cart,
            product_uuid = %item.product_uuid,
            quantity = item.quantity
        ),
        err
    )]
    pub(crate) async fn add_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: &NewCartItem,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(ADD_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(cart.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.variant_uuid.map(VariantUuid::into_uuid))
            .bind(quantity_param(item.quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        key: CartItemKey,
        quantity: u32,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(key.product_uuid.into_uuid())
            .bind(key.variant_uuid.map(VariantUuid::into_uuid))
            .bind(quantity_param(quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        key: CartItemKey,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(key.product_uuid.into_uuid())
            .bind(key.variant_uuid.map(VariantUuid::into_uuid))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn quantity_param(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: "quantity".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            variant_uuid: row
                .try_get::<Option<Uuid>, _>("variant_uuid")?
                .map(VariantUuid::from_uuid),
            quantity: try_get_count(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
