//! Webhook Errors

use salvo::http::StatusError;
use tracing::warn;

use storefront_app::domain::webhooks::WebhooksServiceError;

use crate::orders;

pub(crate) fn into_status_error(error: WebhooksServiceError) -> StatusError {
    match error {
        WebhooksServiceError::Webhook(_) | WebhooksServiceError::InvalidOrderId(_) => {
            warn!("rejected payment notification: {error}");

            StatusError::bad_request().brief(error.to_string())
        }
        WebhooksServiceError::Orders(source) => orders::errors::into_status_error(source),
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::{domain::orders::OrdersServiceError, gateways::webhook::WebhookError};

    use super::*;

    #[test]
    fn bad_signatures_are_400() {
        let status = into_status_error(WebhooksServiceError::Webhook(
            WebhookError::SignatureMismatch,
        ));

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert_eq!(status.brief, "no signature matches the payload");
    }

    #[test]
    fn unknown_orders_are_404() {
        let status = into_status_error(WebhooksServiceError::Orders(OrdersServiceError::NotFound));

        assert_eq!(status.code, StatusCode::NOT_FOUND);
    }
}
