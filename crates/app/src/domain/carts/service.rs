//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use rusty_money::iso::Currency;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartItemKey, NewCart, NewCartItem},
            errors::CartsServiceError,
            priced::PricedCart,
            records::{CartItemRecord, CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::{
            PgProductsRepository,
            data::ProductFilter,
            records::{ProductRecord, ProductUuid, VariantUuid},
        },
        settings::PgSettingsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    currency: &'static Currency,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
    settings_repository: PgSettingsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db, currency: &'static Currency) -> Self {
        Self {
            db,
            currency,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            settings_repository: PgSettingsRepository::new(),
        }
    }

    async fn load_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut record = self.carts_repository.get_cart(tx, cart).await?;

        record.items = self.items_repository.get_cart_items(tx, cart).await?;

        Ok(record)
    }

    async fn load_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, CartsServiceError> {
        match self.products_repository.get_product(tx, product).await {
            Ok(product) => Ok(product),
            Err(sqlx::Error::RowNotFound) => Err(CartsServiceError::InvalidReference),
            Err(error) => Err(error.into()),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.load_cart(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "carts.service.price_cart",
        skip(self),
        fields(cart_uuid = %cart, line_count = tracing::field::Empty),
        err
    )]
    async fn price_cart(&self, cart: CartUuid) -> Result<PricedCart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.load_cart(&mut tx, cart).await?;

        let filter = ProductFilter {
            category: None,
            uuids: Some(record.items.iter().map(|item| item.product_uuid).collect()),
        };

        let products = self
            .products_repository
            .list_products(&mut tx, &filter)
            .await?;

        let settings = self
            .settings_repository
            .store_settings(&mut tx, self.currency)
            .await?;

        tx.commit().await?;

        let priced = PricedCart::price(record, &products, settings)?;

        tracing::Span::current().record("line_count", priced.lines.len());

        Ok(priced)
    }

    async fn create_cart(&self, cart: NewCart) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.carts_repository.create_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.carts_repository.delete_cart(&mut tx, cart).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn add_item(
        &self,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        if self.carts_repository.touch_cart(&mut tx, cart).await? == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let product = self.load_product(&mut tx, item.product_uuid).await?;

        let stock = line_stock(&product, item.variant_uuid)?;

        let line = match self.items_repository.add_cart_item(&mut tx, cart, &item).await {
            Ok(line) => line,
            Err(sqlx::Error::RowNotFound) => return Err(CartsServiceError::InvalidReference),
            Err(error) => return Err(error.into()),
        };

        ensure_in_stock(stock, line.quantity)?;

        tx.commit().await?;

        Ok(line)
    }

    async fn update_item_quantity(
        &self,
        cart: CartUuid,
        key: CartItemKey,
        quantity: u32,
    ) -> Result<Option<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if self.carts_repository.touch_cart(&mut tx, cart).await? == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let line = if quantity == 0 {
            if self.items_repository.delete_cart_item(&mut tx, cart, key).await? == 0 {
                return Err(CartsServiceError::NotFound);
            }

            None
        } else {
            let line = self
                .items_repository
                .update_cart_item(&mut tx, cart, key, quantity)
                .await?;

            let product = self.load_product(&mut tx, key.product_uuid).await?;

            ensure_in_stock(line_stock(&product, key.variant_uuid)?, line.quantity)?;

            Some(line)
        };

        tx.commit().await?;

        Ok(line)
    }

    async fn remove_item(&self, cart: CartUuid, key: CartItemKey) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if self.carts_repository.touch_cart(&mut tx, cart).await? == 0 {
            return Err(CartsServiceError::NotFound);
        }

        if self.items_repository.delete_cart_item(&mut tx, cart, key).await? == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if self.carts_repository.touch_cart(&mut tx, cart).await? == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.items_repository.clear_cart_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(())
    }
}

/// Stock available to a line; `None` when the product has no variants and
/// so no tracked stock.
fn line_stock(
    product: &ProductRecord,
    variant: Option<VariantUuid>,
) -> Result<Option<u32>, CartsServiceError> {
    match variant {
        Some(variant) => product
            .variant(variant)
            .map(|variant| Some(variant.stock))
            .ok_or(CartsServiceError::InvalidReference),
        None if !product.variants.is_empty() => Err(CartsServiceError::VariantRequired),
        None => Ok(None),
    }
}

fn ensure_in_stock(stock: Option<u32>, quantity: u32) -> Result<(), CartsServiceError> {
    if stock.is_some_and(|stock| quantity > stock) {
        return Err(CartsServiceError::InsufficientStock);
    }

    Ok(())
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a cart and its stored lines.
    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError>;

    /// Retrieve a cart with every line priced against the live catalog.
    async fn price_cart(&self, cart: CartUuid) -> Result<PricedCart, CartsServiceError>;

    /// Creates a new, empty cart.
    async fn create_cart(&self, cart: NewCart) -> Result<CartRecord, CartsServiceError>;

    /// Deletes a cart.
    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError>;

    /// Add a product, merging with an existing line for the same product
    /// and variant.
    async fn add_item(
        &self,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Set a line's quantity; zero removes the line and returns `None`.
    async fn update_item_quantity(
        &self,
        cart: CartUuid,
        key: CartItemKey,
        quantity: u32,
    ) -> Result<Option<CartItemRecord>, CartsServiceError>;

    /// Remove a line.
    async fn remove_item(&self, cart: CartUuid, key: CartItemKey) -> Result<(), CartsServiceError>;

    /// Remove every line, keeping the cart.
    async fn clear_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError>;
}


#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use storefront::catalog::{CategoryTags, ParcelDimensions};

    use crate::domain::products::records::VariantRecord;

    use super::*;

    fn product(stocks: &[u32]) -> ProductRecord {
        let uuid = ProductUuid::new();

        ProductRecord {
            uuid,
            name: "Canvas Tote".to_owned(),
            description: None,
            price: 59_90,
            discount_price: None,
            image_url: None,
            gallery: Vec::new(),
            dimensions: ParcelDimensions::default(),
            categories: CategoryTags::default(),
            variants: stocks
                .iter()
                .map(|&stock| VariantRecord {
                    uuid: VariantUuid::new(),
                    product_uuid: uuid,
                    color: None,
                    color_name: None,
                    size: None,
                    price: None,
                    stock,
                    image_url: None,
                })
                .collect(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    #[test]
    fn variant_lines_are_limited_by_variant_stock() {
        let record = product(&[3]);
        let variant = record.variants[0].uuid;

        assert!(matches!(line_stock(&record, Some(variant)), Ok(Some(3))));
    }

    #[test]
    fn products_without_variants_are_untracked() {
        assert!(matches!(line_stock(&product(&[]), None), Ok(None)));
    }

    #[test]
    fn products_with_variants_require_one() {
        assert!(matches!(
            line_stock(&product(&[3]), None),
            Err(CartsServiceError::VariantRequired)
        ));
    }

    #[test]
    fn unknown_variants_are_invalid_references() {
        assert!(matches!(
            line_stock(&product(&[3]), Some(VariantUuid::new())),
            Err(CartsServiceError::InvalidReference)
        ));
    }

    #[test]
    fn raising_a_line_past_stock_is_rejected() {
        let record = product(&[1]);
        let stock = line_stock(&record, Some(record.variants[0].uuid)).ok().flatten();

        assert!(ensure_in_stock(stock, 1).is_ok());
        assert!(matches!(
            ensure_in_stock(stock, 999),
            Err(CartsServiceError::InsufficientStock)
        ));
        assert!(ensure_in_stock(None, 999).is_ok());
    }
}
