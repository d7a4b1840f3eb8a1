//! Payment Webhook Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_app::domain::webhooks::WebhookOutcome;

use crate::{
    extensions::*,
    observability::{PaymentNotification, observe_payment_notification},
    state::State,
    webhooks::errors::into_status_error,
};

/// Header carrying the processor's `t=...,v1=...` signature
const SIGNATURE_HEADER: &str = "stripe-signature";

/// Acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WebhookResponse {
    pub received: bool,
}

/// Payment Webhook Handler
///
/// Verifies the signature over the raw body before anything is parsed.
/// Events the store does not act on are acknowledged.
#[endpoint(
    tags("webhooks"),
    summary = "Payment Notification",
    responses(
        (status_code = StatusCode::OK, description = "Notification processed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Signature or payload rejected"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<WebhookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);

    let payload = req.payload().await.or_400()?.to_vec();

    let outcome = state
        .app
        .webhooks
        .handle_payment_event(payload, signature)
        .await
        .map_err(|error| {
            observe_payment_notification(PaymentNotification::Rejected);
            into_status_error(error)
        })?;

    match outcome {
        WebhookOutcome::Paid(order) => {
            observe_payment_notification(PaymentNotification::Paid);
            info!(order_uuid = %order.uuid, "payment notification applied");
        }
        WebhookOutcome::Ignored => observe_payment_notification(PaymentNotification::Ignored),
    }

    Ok(Json(WebhookResponse { received: true }))
}
