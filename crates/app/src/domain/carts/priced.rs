//! Priced Carts

use storefront::{
    cart::{CartLine, CartSummary, aggregate},
    settings::StoreSettings,
};
use tracing::debug;

use crate::domain::{
    carts::{errors::CartsServiceError, records::CartRecord},
    products::records::ProductRecord,
};

/// A stored cart resolved against the live catalog and the current settings.
#[derive(Debug, Clone)]
pub struct PricedCart {
    pub cart: CartRecord,
    pub settings: StoreSettings<'static>,
    pub lines: Vec<CartLine<'static>>,
    pub summary: CartSummary<'static>,
}

impl PricedCart {
    /// Price `cart` using `products`. Lines whose product or variant has been
    /// removed from the catalog are left out.
    ///
    /// # Errors
    ///
    /// Returns an error when a stored amount is out of range or aggregation
    /// fails.
    pub fn price(
        cart: CartRecord,
        products: &[ProductRecord],
        settings: StoreSettings<'static>,
    ) -> Result<Self, CartsServiceError> {
        let currency = settings.currency();
        let mut lines = Vec::with_capacity(cart.items.len());

        for item in &cart.items {
            let Some(product) = products
                .iter()
                .find(|product| product.uuid == item.product_uuid)
            else {
                debug!(product_uuid = %item.product_uuid, "skipping line for removed product");
                continue;
            };

            let variant = match item.variant_uuid {
                Some(variant_uuid) => match product.variant(variant_uuid) {
                    Some(variant) => Some(variant.to_variant(currency)?),
                    None => {
                        debug!(variant_uuid = %variant_uuid, "skipping line for removed variant");
                        continue;
                    }
                },
                None => None,
            };

            lines.push(CartLine::new(
                product.to_catalog_item(currency)?,
                variant,
                item.quantity,
            )?);
        }

        let summary = aggregate(&lines, &settings)?;

        Ok(Self {
            cart,
            settings,
            lines,
            summary,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rusty_money::{Money, iso::BRL};
    use storefront::catalog::{CategoryTags, ParcelDimensions};
    use testresult::TestResult;

    use crate::domain::{
        carts::records::{CartItemRecord, CartItemUuid, CartUuid},
        products::records::{ProductUuid, VariantRecord, VariantUuid},
    };

    use super::*;

    fn product(price: u64) -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            name: "Wool Scarf".to_owned(),
            description: None,
            price,
            discount_price: None,
            image_url: None,
            gallery: Vec::new(),
            dimensions: ParcelDimensions::default(),
            categories: CategoryTags::default(),
            variants: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    fn item(
        cart: CartUuid,
        product: ProductUuid,
        variant: Option<VariantUuid>,
        quantity: u32,
    ) -> CartItemRecord {
        CartItemRecord {
            uuid: CartItemUuid::new(),
            cart_uuid: cart,
            product_uuid: product,
            variant_uuid: variant,
            quantity,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn cart(items: impl FnOnce(CartUuid) -> Vec<CartItemRecord>) -> CartRecord {
        let uuid = CartUuid::new();

        CartRecord {
            uuid,
            items: items(uuid),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn prices_lines_against_the_catalog() -> TestResult {
        let mut scarf = product(80_00);
        let variant = VariantRecord {
            uuid: VariantUuid::new(),
            product_uuid: scarf.uuid,
            color: None,
            color_name: Some("Red".to_owned()),
            size: None,
            price: Some(60_00),
            stock: 2,
            image_url: None,
        };
        let variant_uuid = variant.uuid;
        scarf.variants.push(variant);

        let socks = product(15_00);

        let stored = cart(|uuid| {
            vec![
                item(uuid, scarf.uuid, Some(variant_uuid), 1),
                item(uuid, socks.uuid, None, 2),
            ]
        });

        let priced = PricedCart::price(stored, &[scarf, socks], StoreSettings::defaults(BRL))?;

        assert_eq!(priced.lines.len(), 2);
        assert_eq!(priced.summary.subtotal, Money::from_minor(90_00, BRL));
        assert_eq!(priced.summary.item_count, 3);

        Ok(())
    }

    #[test]
    fn removed_products_and_variants_are_skipped() -> TestResult {
        let scarf = product(80_00);

        let stored = cart(|uuid| {
            vec![
                item(uuid, ProductUuid::new(), None, 1),
                item(uuid, scarf.uuid, Some(VariantUuid::new()), 1),
                item(uuid, scarf.uuid, None, 1),
            ]
        });

        let priced = PricedCart::price(stored, &[scarf], StoreSettings::defaults(BRL))?;

        assert_eq!(priced.lines.len(), 1);
        assert_eq!(priced.summary.subtotal, Money::from_minor(80_00, BRL));

        Ok(())
    }

    #[test]
    fn empty_cart_has_zero_subtotal() -> TestResult {
        let priced = PricedCart::price(cart(|_| Vec::new()), &[], StoreSettings::defaults(BRL))?;

        assert!(priced.is_empty());
        assert_eq!(priced.summary.subtotal, Money::from_minor(0, BRL));

        Ok(())
    }
}
