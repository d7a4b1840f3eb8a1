//! Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::orders::{Actor, OrderStatus};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusRequest {
    /// `shipped`, `delivered` or `cancelled`
    pub status: String,
}

/// Order Status Handler
///
/// Delivering an order credits the customer's cashback; cancelling refunds
/// cashback spent on it and restocks its lines. Only the payment webhook
/// marks orders paid.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Transition reserved for the payment processor"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed from the current status"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<OrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let to = json.into_inner().status.parse::<OrderStatus>().or_400()?;

    let order = state
        .app
        .orders
        .transition_status(order.into_inner().into(), to, Actor::Admin)
        .await
        .map_err(into_status_error)?;

    info!(order_uuid = %order.uuid, status = %order.status, "order status changed");

    Ok(Json(order.into()))
}
