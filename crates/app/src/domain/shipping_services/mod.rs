//! Shipping Services
//!
//! Carrier services the store quotes through the shipping aggregator.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::ShippingServicesServiceError;
pub(crate) use repository::PgShippingServicesRepository;
pub use service::*;
