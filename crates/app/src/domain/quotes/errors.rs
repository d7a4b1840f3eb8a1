//! Quote errors.

use storefront::shipping::QuoteError;
use thiserror::Error;

use crate::{
    domain::{carts::CartsServiceError, shipping_services::ShippingServicesServiceError},
    gateways::GatewayError,
};

#[derive(Debug, Error)]
pub enum QuotesServiceError {
    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("shipping aggregator request failed")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Carts(#[from] CartsServiceError),

    #[error(transparent)]
    ShippingServices(#[from] ShippingServicesServiceError),
}
