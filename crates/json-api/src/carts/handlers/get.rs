//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{CartResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the cart priced against the live catalog and current settings.
/// Lines whose product was removed are left out.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let priced = state
        .app
        .carts
        .price_cart(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(priced.try_into()?))
}
