//! Create Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::{data::NewCartItem, records::CartItemUuid};

use crate::{
    carts::{errors::into_status_error, items::CartItemResponse},
    extensions::*,
    state::State,
};

/// Create Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCartItemRequest {
    pub product_uuid: Uuid,

    /// Required for products sold in variants
    pub variant_uuid: Option<Uuid>,

    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl From<CreateCartItemRequest> for NewCartItem {
    fn from(request: CreateCartItemRequest) -> Self {
        NewCartItem {
            uuid: CartItemUuid::new(),
            product_uuid: request.product_uuid.into(),
            variant_uuid: request.variant_uuid.map(Into::into),
            quantity: request.quantity,
        }
    }
}

/// Create Cart Item Handler
///
/// Adding a product already in the cart, in the same variant, increases the
/// existing line's quantity.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart, product or variant not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid quantity or missing variant"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<CreateCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    if request.quantity == 0 {
        return Err(StatusError::unprocessable_entity().brief("Quantity must be at least 1"));
    }

    let item = state
        .app
        .carts
        .add_item(cart.into_inner().into(), request.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
