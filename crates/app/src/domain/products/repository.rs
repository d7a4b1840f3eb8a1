//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::catalog::{CategoryTags, ParcelDimensions};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::{amount_param, try_get_amount, try_get_count, try_get_optional_amount},
    domain::products::{
        data::{NewVariant, ProductDetails, ProductFilter},
        records::{ProductRecord, ProductUuid, VariantRecord, VariantUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_VARIANTS_SQL: &str = include_str!("sql/list_variants.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const UPSERT_VARIANTS_SQL: &str = include_str!("sql/upsert_variants.sql");
const DELETE_STALE_VARIANTS_SQL: &str = include_str!("sql/delete_stale_variants.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "products.repository.list_products",
        skip(self, tx),
        fields(product_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let uuids: Option<Vec<Uuid>> = filter
            .uuids
            .as_ref()
            .map(|uuids| uuids.iter().copied().map(Into::into).collect());

        let mut products = query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category.as_deref())
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        self.attach_variants(tx, &mut products).await?;

        tracing::Span::current().record("product_count", products.len());

        Ok(products)
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        let record = query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut products = vec![record];

        self.attach_variants(tx, &mut products).await?;

        products.pop().ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        details: &ProductDetails,
    ) -> Result<(), sqlx::Error> {
        bind_details(query(CREATE_PRODUCT_SQL).bind(product.into_uuid()), details)?
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        details: &ProductDetails,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected =
            bind_details(query(UPDATE_PRODUCT_SQL).bind(product.into_uuid()), details)?
                .execute(&mut **tx)
                .await?
                .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Replace the variants of a product. Returns the number of variants
    /// written, which is lower than requested when a variant UUID already
    /// belongs to another product.
    #[tracing::instrument(
        name = "products.repository.replace_variants",
        skip(self, tx, variants),
        fields(variant_count = variants.len()),
        err
    )]
    pub(crate) async fn replace_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variants: &[NewVariant],
    ) -> Result<u64, sqlx::Error> {
        let uuids: Vec<Uuid> = variants.iter().map(|variant| variant.uuid.into_uuid()).collect();

        query(DELETE_STALE_VARIANTS_SQL)
            .bind(product.into_uuid())
            .bind(&uuids)
            .execute(&mut **tx)
            .await?;

        if variants.is_empty() {
            return Ok(0);
        }

        let product_uuids = vec![product.into_uuid(); variants.len()];
        let colors: Vec<Option<String>> = variants.iter().map(|v| v.color.clone()).collect();
        let color_names: Vec<Option<String>> =
            variants.iter().map(|v| v.color_name.clone()).collect();
        let sizes: Vec<Option<String>> = variants.iter().map(|v| v.size.clone()).collect();
        let prices: Vec<Option<i64>> = variants
            .iter()
            .map(|v| v.price.map(|price| amount_param(price, "price")).transpose())
            .collect::<Result<_, _>>()?;
        let stocks: Vec<i32> = variants
            .iter()
            .map(|v| {
                i32::try_from(v.stock).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "stock".to_string(),
                    source: Box::new(e),
                })
            })
            .collect::<Result<_, _>>()?;
        let image_urls: Vec<Option<String>> =
            variants.iter().map(|v| v.image_url.clone()).collect();

        let written = query(UPSERT_VARIANTS_SQL)
            .bind(&uuids)
            .bind(&product_uuids)
            .bind(&colors)
            .bind(&color_names)
            .bind(&sizes)
            .bind(&prices)
            .bind(&stocks)
            .bind(&image_urls)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        debug!(written, "replaced product variants");

        Ok(written)
    }

    async fn attach_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &mut [ProductRecord],
    ) -> Result<(), sqlx::Error> {
        if products.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = products.iter().map(|p| p.uuid.into_uuid()).collect();

        let variants = query_as::<Postgres, VariantRecord>(LIST_VARIANTS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_product: FxHashMap<ProductUuid, Vec<VariantRecord>> = FxHashMap::default();

        for variant in variants {
            by_product
                .entry(variant.product_uuid)
                .or_default()
                .push(variant);
        }

        for product in products.iter_mut() {
            product.variants = by_product.remove(&product.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

fn bind_details<'q>(
    query: sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments>,
    details: &'q ProductDetails,
) -> Result<sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments>, sqlx::Error> {
    Ok(query
        .bind(&details.name)
        .bind(&details.description)
        .bind(amount_param(details.price, "price")?)
        .bind(
            details
                .discount_price
                .map(|price| amount_param(price, "discount_price"))
                .transpose()?,
        )
        .bind(&details.image_url)
        .bind(&details.gallery)
        .bind(details.dimensions.weight_kg)
        .bind(details.dimensions.width_cm)
        .bind(details.dimensions.height_cm)
        .bind(details.dimensions.length_cm))
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let categories: Vec<String> = row.try_get("categories")?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: try_get_amount(row, "price")?,
            discount_price: try_get_optional_amount(row, "discount_price")?,
            image_url: row.try_get("image_url")?,
            gallery: row.try_get("gallery")?,
            dimensions: ParcelDimensions {
                weight_kg: row.try_get("weight_kg")?,
                width_cm: row.try_get("width_cm")?,
                height_cm: row.try_get("height_cm")?,
                length_cm: row.try_get("length_cm")?,
            },
            categories: CategoryTags::new(categories),
            variants: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VariantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            color: row.try_get("color")?,
            color_name: row.try_get("color_name")?,
            size: row.try_get("size")?,
            price: try_get_optional_amount(row, "price")?,
            stock: try_get_count(row, "stock")?,
            image_url: row.try_get("image_url")?,
        })
    }
}
