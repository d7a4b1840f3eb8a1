//! Shipping Services
//!
//! Aggregator services the store offers. Only active services are quoted.

mod errors;
mod handlers;

pub(crate) use handlers::*;
