//! Shipping Quotes
//!
//! Prices a stored cart, asks the aggregator for the active carrier services
//! and assembles the options shown at checkout.

pub mod errors;
mod service;

pub use errors::QuotesServiceError;
pub(crate) use service::quote_options;
pub use service::*;
