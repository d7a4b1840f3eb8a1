//! Catalog
//!
//! Items and variants as the storefront prices them.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use uuid::Uuid;

/// Category names attached to an item, kept sorted and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTags {
    names: SmallVec<[String; 3]>,
}

impl CategoryTags {
    /// Build a tag set from category names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: SmallVec<[String; 3]> = names
            .into_iter()
            .map(Into::into)
            .map(|name: String| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect();

        names.sort();
        names.dedup();

        Self { names }
    }

    /// Whether the item belongs to the named category.
    pub fn contains(&self, name: &str) -> bool {
        self.names
            .binary_search_by(|candidate| candidate.as_str().cmp(name))
            .is_ok()
    }

    /// Iterate category names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the item has no categories.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Physical dimensions used when quoting shipping. Absent values take the
/// carrier defaults when a parcel is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParcelDimensions {
    /// Weight in kilograms.
    pub weight_kg: Option<Decimal>,

    /// Width in centimetres.
    pub width_cm: Option<Decimal>,

    /// Height in centimetres.
    pub height_cm: Option<Decimal>,

    /// Length in centimetres.
    pub length_cm: Option<Decimal>,
}

/// A purchasable configuration of an item.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant<'a> {
    /// Variant identifier
    pub id: Uuid,

    /// Owning item identifier
    pub item_id: Uuid,

    /// Color code, e.g. `#000000`
    pub color: Option<String>,

    /// Human readable color name
    pub color_name: Option<String>,

    /// Size label
    pub size: Option<String>,

    /// Own price, overriding every item level price when positive
    pub price: Option<Money<'a, Currency>>,

    /// Units in stock
    pub stock: u32,

    /// Image URL
    pub image_url: Option<String>,
}

impl Variant<'_> {
    /// Label used on payment line items and order e-mails, e.g. `Black / M`.
    pub fn description(&self) -> String {
        let parts: SmallVec<[&str; 2]> = [self.color_name.as_deref(), self.size.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            return "Standard".to_owned();
        }

        parts.join(" / ")
    }
}

/// A catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem<'a> {
    /// Item identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Base price
    pub price: Money<'a, Currency>,

    /// Item level sale price
    pub discount_price: Option<Money<'a, Currency>>,

    /// Categories
    pub categories: CategoryTags,

    /// Shipping dimensions
    pub dimensions: ParcelDimensions,

    /// Main image URL
    pub image_url: Option<String>,

    /// Variants, possibly empty
    pub variants: Vec<Variant<'a>>,
}

impl<'a> CatalogItem<'a> {
    /// Create an item with a base price and no variants.
    pub fn new(id: Uuid, name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            discount_price: None,
            categories: CategoryTags::default(),
            dimensions: ParcelDimensions::default(),
            image_url: None,
            variants: Vec::new(),
        }
    }

    /// Set the item level discount price.
    #[must_use]
    pub fn with_discount_price(mut self, discount_price: Money<'a, Currency>) -> Self {
        self.discount_price = Some(discount_price);
        self
    }

    /// Attach a variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant<'a>) -> Self {
        self.variants.push(variant);
        self
    }

    /// Look up a variant of this item.
    pub fn variant(&self, id: Uuid) -> Option<&Variant<'a>> {
        self.variants.iter().find(|variant| variant.id == id)
    }

    /// Whether the item sells in variants.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;

    use super::*;

    fn variant(color_name: Option<&str>, size: Option<&str>) -> Variant<'static> {
        Variant {
            id: Uuid::nil(),
            item_id: Uuid::nil(),
            color: None,
            color_name: color_name.map(ToOwned::to_owned),
            size: size.map(ToOwned::to_owned),
            price: None,
            stock: 1,
            image_url: None,
        }
    }

    #[test]
    fn category_tags_are_sorted_and_unique() {
        let tags = CategoryTags::new(["Shirts", "Kids", "Shirts", "  "]);

        assert_eq!(tags.len(), 2);
        assert_eq!(tags.iter().collect::<Vec<_>>(), ["Kids", "Shirts"]);
        assert!(tags.contains("Kids"));
        assert!(!tags.contains("Shoes"));
    }

    #[test]
    fn variant_description_joins_present_parts() {
        assert_eq!(
            variant(Some("Black"), Some("M")).description(),
            "Black / M"
        );
        assert_eq!(variant(None, Some("M")).description(), "M");
        assert_eq!(variant(None, None).description(), "Standard");
    }

    #[test]
    fn variant_lookup_by_id() {
        let id = Uuid::now_v7();
        let item = CatalogItem::new(Uuid::now_v7(), "Tee", Money::from_minor(50_00, BRL))
            .with_variant(Variant {
                id,
                ..variant(Some("Red"), None)
            });

        assert!(item.has_variants());
        assert_eq!(item.variant(id).map(|v| v.id), Some(id));
        assert!(item.variant(Uuid::nil()).is_none());
    }
}
