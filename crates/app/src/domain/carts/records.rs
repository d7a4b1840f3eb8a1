//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::products::records::{ProductUuid, VariantUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
