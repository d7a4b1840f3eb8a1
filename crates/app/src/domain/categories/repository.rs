//! Categories Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    categories::{
        data::{CategoryUpdate, NewCategory},
        records::{CategoryRecord, CategoryUuid},
    },
    products::records::ProductUuid,
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");
const SYNC_CATEGORIES_SQL: &str = include_str!("sql/sync_categories.sql");
const LINK_PRODUCTS_SQL: &str = include_str!("sql/link_products.sql");
const UNLINK_PRODUCTS_SQL: &str = include_str!("sql/unlink_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(&category.name)
            .bind(&category.image_url)
            .bind(&category.icon_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        update: &CategoryUpdate,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(UPDATE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .bind(&update.name)
            .bind(&update.image_url)
            .bind(&update.icon_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    #[tracing::instrument(
        name = "categories.repository.sync_categories",
        skip(self, tx),
        fields(
            names_count = tracing::field::Empty,
            synced_category_count = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn sync_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        names: &[&str],
    ) -> Result<FxHashMap<String, CategoryUuid>, sqlx::Error> {
        tracing::Span::current().record("names_count", names.len());

        if names.is_empty() {
            return Ok(FxHashMap::default());
        }

        let new_uuids: Vec<Uuid> = names.iter().map(|_| Uuid::now_v7()).collect();
        let names_vec: Vec<String> = names.iter().map(|s| (*s).to_owned()).collect();

        let rows: Vec<(Uuid, String)> = query_as(SYNC_CATEGORIES_SQL)
            .bind(&new_uuids)
            .bind(&names_vec)
            .fetch_all(&mut **tx)
            .await?;

        let category_map: FxHashMap<String, CategoryUuid> = rows
            .into_iter()
            .map(|(uuid, name)| (name, CategoryUuid::from_uuid(uuid)))
            .collect();

        let synced_category_count = category_map.len();

        tracing::Span::current().record("synced_category_count", synced_category_count);

        debug!(synced_category_count, "synchronized categories");

        Ok(category_map)
    }

    #[tracing::instrument(
        name = "categories.repository.link_products",
        skip(self, tx, pairs),
        fields(pair_count = pairs.len()),
        err
    )]
    pub(crate) async fn link_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pairs: &[(CategoryUuid, ProductUuid)],
    ) -> Result<(), sqlx::Error> {
        if pairs.is_empty() {
            return Ok(());
        }

        let category_uuids: Vec<Uuid> = pairs
            .iter()
            .map(|(category, _)| category.into_uuid())
            .collect();

        let product_uuids: Vec<Uuid> = pairs
            .iter()
            .map(|(_, product)| product.into_uuid())
            .collect();

        query(LINK_PRODUCTS_SQL)
            .bind(&category_uuids)
            .bind(&product_uuids)
            .execute(&mut **tx)
            .await?;

        debug!(pair_count = pairs.len(), "linked products to categories");

        Ok(())
    }

    pub(crate) async fn unlink_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<(), sqlx::Error> {
        if products.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = products.iter().copied().map(Into::into).collect();

        query(UNLINK_PRODUCTS_SQL)
            .bind(&uuids)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Create missing categories and return the category/product pairs to link.
    #[tracing::instrument(
        name = "categories.repository.resolve_product_categories",
        skip(self, tx, categories_by_product),
        fields(
            product_count = categories_by_product.len(),
            resolved_pair_count = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn resolve_product_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        categories_by_product: &[(ProductUuid, SmallVec<[String; 3]>)],
    ) -> Result<SmallVec<[(CategoryUuid, ProductUuid); 3]>, sqlx::Error> {
        let all_names: SmallVec<[&str; 5]> = categories_by_product
            .iter()
            .flat_map(|(_, names)| names.iter().map(String::as_str))
            .collect();

        let category_map = self.sync_categories(tx, &all_names).await?;

        let resolved: SmallVec<[(CategoryUuid, ProductUuid); 3]> = categories_by_product
            .iter()
            .flat_map(|(product, names)| {
                names.iter().filter_map(|name| {
                    category_map
                        .get(name.as_str())
                        .copied()
                        .map(|category| (category, *product))
                })
            })
            .collect();

        tracing::Span::current().record("resolved_pair_count", resolved.len());

        Ok(resolved)
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let product_count: i64 = row.try_get("product_count")?;

        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            image_url: row.try_get("image_url")?,
            icon_url: row.try_get("icon_url")?,
            product_count: u64::try_from(product_count).unwrap_or_default(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
