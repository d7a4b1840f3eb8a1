//! Webhook errors.

use thiserror::Error;

use crate::{domain::orders::OrdersServiceError, gateways::webhook::WebhookError};

#[derive(Debug, Error)]
pub enum WebhooksServiceError {
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    #[error("order id in event metadata is not a valid id: {0}")]
    InvalidOrderId(String),

    #[error(transparent)]
    Orders(#[from] OrdersServiceError),
}
