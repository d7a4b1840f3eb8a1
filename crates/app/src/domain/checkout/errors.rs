//! Checkout errors.

use std::num::TryFromIntError;

use storefront::checkout::{CheckoutError, CheckoutFlowError, CheckoutValidationError};
use thiserror::Error;

use crate::{
    domain::{
        carts::CartsServiceError, customers::CustomersServiceError, orders::OrdersServiceError,
        quotes::QuotesServiceError,
    },
    gateways::GatewayError,
};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error(transparent)]
    Validation(#[from] CheckoutValidationError),

    #[error("cart is empty")]
    EmptyCart,

    #[error("pay on delivery is not available")]
    PayOnDeliveryDisabled,

    #[error("cart does not qualify for free shipping")]
    FreeShippingNotEligible,

    #[error("shipping service {0} is not available for this address")]
    ShippingUnavailable(u32),

    #[error("cashback covers the whole order; reduce the cashback to pay by card")]
    NothingToCharge,

    #[error("invalid amount")]
    InvalidAmount(#[from] TryFromIntError),

    #[error(transparent)]
    Totals(#[from] CheckoutError),

    #[error(transparent)]
    Flow(#[from] CheckoutFlowError),

    #[error("payment processor request failed")]
    Payment(#[source] GatewayError),

    #[error(transparent)]
    Quotes(#[from] QuotesServiceError),

    #[error(transparent)]
    Carts(#[from] CartsServiceError),

    #[error(transparent)]
    Customers(#[from] CustomersServiceError),

    #[error(transparent)]
    Orders(#[from] OrdersServiceError),
}
