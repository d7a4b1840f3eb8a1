//! Cart Data

use crate::domain::{
    carts::records::{CartItemUuid, CartUuid},
    products::records::{ProductUuid, VariantUuid},
};

/// New Cart Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCart {
    pub uuid: CartUuid,
}

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub quantity: u32,
}

/// Identity of a line within a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItemKey {
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
}
