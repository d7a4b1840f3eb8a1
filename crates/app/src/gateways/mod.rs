//! Gateways
//!
//! HTTP clients for the services the store depends on: the shipping-rate
//! aggregator, the payment processor and the transactional e-mail service.

mod errors;
pub mod mail;
pub mod payments;
pub mod shipping;
pub mod webhook;

pub use errors::GatewayError;
