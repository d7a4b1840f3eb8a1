//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::data::CartItemKey;

use crate::{
    carts::{errors::into_status_error, items::CartItemResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity; zero removes the line
    pub quantity: u32,
}

/// Update Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemResponse {
    /// The updated line, absent when the line was removed
    pub item: Option<CartItemResponse>,
}

/// Update Cart Item Handler
///
/// Lines are addressed by product, plus `?variant=` for variant lines.
#[endpoint(
    tags("carts"),
    summary = "Set Cart Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated or line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    product: PathParam<Uuid>,
    variant: QueryParam<Uuid, false>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<UpdateCartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let key = CartItemKey {
        product_uuid: product.into_inner().into(),
        variant_uuid: variant.into_inner().map(Into::into),
    };

    let item = state
        .app
        .carts
        .update_item_quantity(cart.into_inner().into(), key, json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(UpdateCartItemResponse {
        item: item.map(Into::into),
    }))
}
