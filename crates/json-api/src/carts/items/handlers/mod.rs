//! Cart Item Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::CartItemRecord;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod update;

/// Cart Item
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub variant_uuid: Option<Uuid>,
    pub quantity: u32,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            variant_uuid: item.variant_uuid.map(Into::into),
            quantity: item.quantity,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use storefront_app::domain::carts::records::{CartItemUuid, CartUuid};
    use storefront_app::domain::products::records::{ProductUuid, VariantUuid};

    use super::*;

    pub(crate) fn make_item(
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
}
