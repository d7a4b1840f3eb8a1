//! Webhooks service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError},
        orders::{OrdersService, OrdersServiceError, records::OrderRecord},
        webhooks::WebhooksServiceError,
    },
    gateways::webhook::{WebhookError, parse_event, verify_webhook},
};

/// Signing secret and clock tolerance for payment notifications.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub secret: String,
    pub tolerance_seconds: i64,
}

/// What a delivery did.
#[derive(Debug, Clone)]
pub enum WebhookOutcome {
    /// Order marked paid, or already paid.
    Paid(OrderRecord),

    /// Event type the store does not act on, or an order that can no longer
    /// be paid.
    Ignored,
}

#[derive(Clone)]
pub struct PaymentWebhooksService {
    config: WebhookConfig,
    orders: Arc<dyn OrdersService>,
    carts: Arc<dyn CartsService>,
}

impl PaymentWebhooksService {
    #[must_use]
    pub fn new(
        config: WebhookConfig,
        orders: Arc<dyn OrdersService>,
        carts: Arc<dyn CartsService>,
    ) -> Self {
        Self {
            config,
            orders,
            carts,
        }
    }
}

#[async_trait]
impl WebhooksService for PaymentWebhooksService {
    #[tracing::instrument(
        name = "webhooks.service.handle_payment_event",
        skip(self, payload, signature),
        fields(payload_bytes = payload.len(), order_id = tracing::field::Empty),
        err
    )]
    async fn handle_payment_event(
        &self,
        payload: Vec<u8>,
        signature: Option<String>,
    ) -> Result<WebhookOutcome, WebhooksServiceError> {
        let signature = signature.ok_or(WebhookError::MissingSignature)?;

        verify_webhook(
            &payload,
            &signature,
            &self.config.secret,
            self.config.tolerance_seconds,
            Timestamp::now(),
        )?;

        let Some(completed) = parse_event(&payload)? else {
            return Ok(WebhookOutcome::Ignored);
        };

        tracing::Span::current().record("order_id", completed.order_id.as_str());

        let order_uuid = Uuid::try_parse(&completed.order_id)
            .map_err(|_invalid| WebhooksServiceError::InvalidOrderId(completed.order_id.clone()))?;

        let order = match self
            .orders
            .record_payment(order_uuid.into(), completed.session_id)
            .await
        {
            Ok(order) => order,
            Err(OrdersServiceError::Transition(error)) => {
                warn!(%error, "payment received for an order that cannot be paid");
                return Ok(WebhookOutcome::Ignored);
            }
            Err(error) => return Err(error.into()),
        };

        info!("order paid");

        if let Some(cart) = order.cart_uuid {
            match self.carts.clear_cart(cart).await {
                Ok(()) | Err(CartsServiceError::NotFound) => {}
                Err(error) => warn!(%error, "failed to clear cart after payment"),
            }
        }

        Ok(WebhookOutcome::Paid(order))
    }
}

#[automock]
#[async_trait]
pub trait WebhooksService: Send + Sync {
    /// Verify and apply a payment notification.
    async fn handle_payment_event(
        &self,
        payload: Vec<u8>,
        signature: Option<String>,
    ) -> Result<WebhookOutcome, WebhooksServiceError>;
}
