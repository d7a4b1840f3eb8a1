//! My Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrdersResponse, errors::into_status_error},
    state::State,
};

/// My Orders Handler
///
/// The caller's orders, newest first.
#[endpoint(tags("me"), summary = "My Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let customer = depot.customer_or_403()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_customer_orders(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
