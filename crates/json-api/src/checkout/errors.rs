//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::checkout::CheckoutServiceError;

use crate::{carts, me, orders};

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::Validation(_)
        | CheckoutServiceError::EmptyCart
        | CheckoutServiceError::PayOnDeliveryDisabled
        | CheckoutServiceError::FreeShippingNotEligible
        | CheckoutServiceError::ShippingUnavailable(_)
        | CheckoutServiceError::NothingToCharge => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        CheckoutServiceError::Payment(source) => carts::errors::gateway_status_error(source),
        CheckoutServiceError::Quotes(source) => carts::errors::quote_status_error(source),
        CheckoutServiceError::Carts(source) => carts::errors::into_status_error(source),
        CheckoutServiceError::Customers(source) => me::errors::into_status_error(source),
        CheckoutServiceError::Orders(source) => orders::errors::into_status_error(source),
        CheckoutServiceError::InvalidAmount(_)
        | CheckoutServiceError::Totals(_)
        | CheckoutServiceError::Flow(_) => {
            error!("checkout failed: {error}");

            StatusError::internal_server_error()
        }
    }
}
