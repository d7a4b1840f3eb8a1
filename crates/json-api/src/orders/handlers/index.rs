//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use storefront::orders::OrderStatus;

use storefront_app::domain::orders::data::OrderFilter;

use crate::{
    extensions::*,
    orders::{OrdersResponse, errors::into_status_error},
    state::State,
};

const MAX_LIMIT: u32 = 500;

/// Order Index Handler
///
/// Newest first. `search` matches an order id prefix, or part of the
/// customer's e-mail or name.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    search: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = status
        .into_inner()
        .filter(|status| !status.is_empty() && status != "all")
        .map(|status| status.parse::<OrderStatus>())
        .transpose()
        .or_400()?;

    let mut filter = OrderFilter {
        status,
        search: search
            .into_inner()
            .map(|search| search.trim().to_string())
            .filter(|search| !search.is_empty()),
        ..OrderFilter::default()
    };

    if let Some(limit) = limit.into_inner() {
        filter.limit = limit.clamp(1, MAX_LIMIT);
    }

    let orders = state
        .app
        .orders
        .list_orders(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
