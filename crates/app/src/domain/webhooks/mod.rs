//! Payment Webhooks
//!
//! Verified payment notifications mark orders paid and empty the cart the
//! order was placed from.

pub mod errors;
mod service;

pub use errors::WebhooksServiceError;
pub use service::*;
