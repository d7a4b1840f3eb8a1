//! Checkout
//!
//! Turns a priced cart into an order: form validation, shipping choice,
//! cashback, order creation and either a hosted payment page or a
//! pay-on-delivery confirmation. Any failure leaves the cart as it was.

pub mod data;
pub mod errors;
mod service;

pub use errors::CheckoutServiceError;
pub use service::*;
