//! Product Records

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use storefront::catalog::{CatalogItem, CategoryTags, ParcelDimensions, Variant};

use crate::{domain::products::errors::ProductsServiceError, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Variant UUID
pub type VariantUuid = TypedUuid<VariantRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub discount_price: Option<u64>,
    pub image_url: Option<String>,
    pub gallery: Vec<String>,
    pub dimensions: ParcelDimensions,
    pub categories: CategoryTags,
    pub variants: Vec<VariantRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Variant Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub uuid: VariantUuid,
    pub product_uuid: ProductUuid,
    pub color: Option<String>,
    pub color_name: Option<String>,
    pub size: Option<String>,
    pub price: Option<u64>,
    pub stock: u32,
    pub image_url: Option<String>,
}

impl ProductRecord {
    /// The product as the pricing core sees it.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidPrice`] when a stored amount
    /// does not fit in signed minor units.
    pub fn to_catalog_item(
        &self,
        currency: &'static Currency,
    ) -> Result<CatalogItem<'static>, ProductsServiceError> {
        let mut item = CatalogItem::new(
            self.uuid.into_uuid(),
            self.name.clone(),
            money(self.price, currency)?,
        );

        item.discount_price = self
            .discount_price
            .map(|amount| money(amount, currency))
            .transpose()?;
        item.categories = self.categories.clone();
        item.dimensions = self.dimensions;
        item.image_url = self.image_url.clone();
        item.variants = self
            .variants
            .iter()
            .map(|variant| variant.to_variant(currency))
            .collect::<Result<_, _>>()?;

        Ok(item)
    }

    /// Look up a variant of this product.
    #[must_use]
    pub fn variant(&self, variant: VariantUuid) -> Option<&VariantRecord> {
        self.variants.iter().find(|candidate| candidate.uuid == variant)
    }
}

impl VariantRecord {
    /// The variant as the pricing core sees it.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidPrice`] when the price does not
    /// fit in signed minor units.
    pub fn to_variant(
        &self,
        currency: &'static Currency,
    ) -> Result<Variant<'static>, ProductsServiceError> {
        Ok(Variant {
            id: self.uuid.into_uuid(),
            item_id: self.product_uuid.into_uuid(),
            color: self.color.clone(),
            color_name: self.color_name.clone(),
            size: self.size.clone(),
            price: self.price.map(|amount| money(amount, currency)).transpose()?,
            stock: self.stock,
            image_url: self.image_url.clone(),
        })
    }
}

fn money(
    amount: u64,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, ProductsServiceError> {
    Ok(Money::from_minor(i64::try_from(amount)?, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use testresult::TestResult;

    use super::*;

    fn product() -> ProductRecord {
        let uuid = ProductUuid::new();

        ProductRecord {
            uuid,
            name: "Linen Shirt".to_owned(),
            description: None,
            price: 120_00,
            discount_price: Some(99_90),
            image_url: None,
            gallery: Vec::new(),
            dimensions: ParcelDimensions::default(),
            categories: CategoryTags::new(["Shirts", "Summer"]),
            variants: vec![VariantRecord {
                uuid: VariantUuid::new(),
                product_uuid: uuid,
                color: None,
                color_name: Some("White".to_owned()),
                size: Some("M".to_owned()),
                price: None,
                stock: 4,
                image_url: None,
            }],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    #[test]
    fn converts_to_catalog_item() -> TestResult {
        let record = product();
        let item = record.to_catalog_item(BRL)?;

        assert_eq!(item.id, record.uuid.into_uuid());
        assert_eq!(item.price, Money::from_minor(120_00, BRL));
        assert_eq!(item.discount_price, Some(Money::from_minor(99_90, BRL)));
        assert!(item.categories.contains("Summer"));
        assert_eq!(item.variants.len(), 1);
        assert!(item.variants.iter().all(|variant| variant.item_id == item.id));

        Ok(())
    }

    #[test]
    fn amounts_beyond_i64_are_rejected() {
        let record = ProductRecord {
            price: u64::MAX,
            ..product()
        };

        assert!(matches!(
            record.to_catalog_item(BRL),
            Err(ProductsServiceError::InvalidPrice(_))
        ));
    }
}
