//! Cart Errors

use salvo::http::StatusError;
use storefront::{cart::CartError, shipping::QuoteError};
use tracing::{error, warn};

use storefront_app::{
    domain::{carts::CartsServiceError, quotes::QuotesServiceError},
    gateways::GatewayError,
};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::InvalidReference => {
            StatusError::not_found().brief("Product or variant not found")
        }
        CartsServiceError::Cart(CartError::LineNotFound) => {
            StatusError::not_found().brief("Item is not in the cart")
        }
        CartsServiceError::InvalidQuantity
        | CartsServiceError::VariantRequired
        | CartsServiceError::Cart(
            CartError::InvalidQuantity
            | CartError::VariantRequired(_)
            | CartError::VariantMismatch { .. },
        ) => StatusError::unprocessable_entity().brief(error.to_string()),
        CartsServiceError::InsufficientStock => {
            StatusError::conflict().brief("Not enough stock for this item")
        }
        CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart payload"),
        CartsServiceError::Sql(_)
        | CartsServiceError::Cart(_)
        | CartsServiceError::Products(_)
        | CartsServiceError::Settings(_) => {
            error!("cart operation failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn quote_status_error(error: QuotesServiceError) -> StatusError {
    match error {
        QuotesServiceError::Quote(
            QuoteError::InvalidPostalCode | QuoteError::EmptyCart | QuoteError::NoOptions,
        ) => StatusError::unprocessable_entity().brief(error.to_string()),
        QuotesServiceError::Quote(QuoteError::MissingOrigin) => {
            error!("shipping quote requested without an origin postal code");

            StatusError::service_unavailable().brief("Shipping is not configured for this store")
        }
        QuotesServiceError::Gateway(source) => gateway_status_error(source),
        QuotesServiceError::Carts(source) => into_status_error(source),
        QuotesServiceError::Quote(QuoteError::Cart(_))
        | QuotesServiceError::ShippingServices(_) => {
            error!("shipping quote failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

/// Upstream failures are surfaced with the upstream's message so the
/// shopper can retry.
pub(crate) fn gateway_status_error(error: GatewayError) -> StatusError {
    warn!("upstream request failed: {error}");

    match error {
        GatewayError::UnexpectedResponse(message) => StatusError::bad_gateway().brief(message),
        GatewayError::Http(_) => {
            StatusError::bad_gateway().brief("Upstream service is unavailable, please try again")
        }
    }
}
