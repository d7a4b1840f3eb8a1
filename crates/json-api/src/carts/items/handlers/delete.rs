//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use storefront_app::domain::carts::data::CartItemKey;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Delete Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Item from Cart",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    product: PathParam<Uuid>,
    variant: QueryParam<Uuid, false>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let key = CartItemKey {
        product_uuid: product.into_inner().into(),
        variant_uuid: variant.into_inner().map(Into::into),
    };

    state
        .app
        .carts
        .remove_item(cart.into_inner().into(), key)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
