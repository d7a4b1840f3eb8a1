//! Products service.

use async_trait::async_trait;
use mockall::automock;
use smallvec::SmallVec;
use sqlx::{Postgres, Transaction};
use storefront::pricing::PricingError;

use crate::{
    database::Db,
    domain::{
        categories::PgCategoriesRepository,
        products::{
            data::{NewProduct, ProductDetails, ProductFilter},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    categories: PgCategoriesRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            categories: PgCategoriesRepository::new(),
        }
    }

    /// Write variants and category links for a product saved in `tx`, then
    /// read it back.
    async fn save_relations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        details: &ProductDetails,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let written = self
            .repository
            .replace_variants(tx, product, &details.variants)
            .await?;

        if u64::try_from(details.variants.len()).ok() != Some(written) {
            return Err(ProductsServiceError::InvalidReference);
        }

        self.categories.unlink_products(tx, &[product]).await?;

        let names: SmallVec<[String; 3]> = details.categories.iter().map(str::to_owned).collect();

        let pairs = self
            .categories
            .resolve_product_categories(tx, &[(product, names)])
            .await?;

        self.categories.link_products(tx, &pairs).await?;

        Ok(self.repository.get_product(tx, product).await?)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        validate_details(&product.details)?;

        let mut tx = self.db.begin().await?;

        self.repository
            .create_product(&mut tx, product.uuid, &product.details)
            .await?;

        let created = self
            .save_relations(&mut tx, product.uuid, &product.details)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        details: ProductDetails,
    ) -> Result<ProductRecord, ProductsServiceError> {
        validate_details(&details)?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_product(&mut tx, product, &details)
            .await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        let updated = self.save_relations(&mut tx, product, &details).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

fn validate_details(details: &ProductDetails) -> Result<(), ProductsServiceError> {
    if details.name.trim().is_empty() {
        return Err(ProductsServiceError::MissingRequiredData);
    }

    if details
        .discount_price
        .is_some_and(|discount| discount >= details.price)
    {
        return Err(PricingError::DiscountNotLower.into());
    }

    let mut seen = SmallVec::<[_; 8]>::new();

    for variant in &details.variants {
        if seen.contains(&variant.uuid) {
            return Err(ProductsServiceError::InvalidData);
        }

        seen.push(variant.uuid);
    }

    Ok(())
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Live products matching `filter`, newest first, with their variants.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single live product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Create a product with its variants, creating unknown categories.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replace a product's details, variants and categories.
    async fn update_product(
        &self,
        product: ProductUuid,
        details: ProductDetails,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-delete a product.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use storefront::catalog::{CategoryTags, ParcelDimensions};

    use crate::domain::products::{data::NewVariant, records::VariantUuid};

    use super::*;

    fn details() -> ProductDetails {
        ProductDetails {
            name: "Canvas Tote".to_owned(),
            description: None,
            price: 59_90,
            discount_price: None,
            image_url: None,
            gallery: Vec::new(),
            dimensions: ParcelDimensions::default(),
            categories: CategoryTags::new(["Bags"]),
            variants: Vec::new(),
        }
    }

    fn variant(uuid: VariantUuid) -> NewVariant {
        NewVariant {
            uuid,
            color: None,
            color_name: None,
            size: None,
            price: None,
            stock: 1,
            image_url: None,
        }
    }

    #[test]
    fn accepts_valid_details() {
        assert!(validate_details(&details()).is_ok());
    }

    #[test]
    fn blank_name_is_missing_data() {
        let details = ProductDetails {
            name: "  ".to_owned(),
            ..details()
        };

        assert!(matches!(
            validate_details(&details),
            Err(ProductsServiceError::MissingRequiredData)
        ));
    }

    #[test]
    fn discount_must_be_lower_than_price() {
        for discount in [59_90, 70_00] {
            let details = ProductDetails {
                discount_price: Some(discount),
                ..details()
            };

            assert!(matches!(
                validate_details(&details),
                Err(ProductsServiceError::Pricing(PricingError::DiscountNotLower))
            ));
        }
    }

    #[test]
    fn duplicate_variant_ids_are_rejected() {
        let uuid = VariantUuid::new();
        let details = ProductDetails {
            variants: vec![variant(uuid), variant(VariantUuid::new()), variant(uuid)],
            ..details()
        };

        assert!(matches!(
            validate_details(&details),
            Err(ProductsServiceError::InvalidData)
        ));
    }
}
