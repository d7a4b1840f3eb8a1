//! Products Data

use storefront::catalog::{CategoryTags, ParcelDimensions};

use crate::domain::products::records::{ProductUuid, VariantUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub details: ProductDetails,
}

/// Product fields written on create and replaced on update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub discount_price: Option<u64>,
    pub image_url: Option<String>,
    pub gallery: Vec<String>,
    pub dimensions: ParcelDimensions,
    pub categories: CategoryTags,

    /// Complete variant list; variants missing from it are removed.
    pub variants: Vec<NewVariant>,
}

/// Variant Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariant {
    pub uuid: VariantUuid,
    pub color: Option<String>,
    pub color_name: Option<String>,
    pub size: Option<String>,
    pub price: Option<u64>,
    pub stock: u32,
    pub image_url: Option<String>,
}

/// Product listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Only products in this category
    pub category: Option<String>,

    /// Only these products
    pub uuids: Option<Vec<ProductUuid>>,
}
