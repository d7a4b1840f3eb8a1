//! Carts
//!
//! Server-side cart storage. Lines are keyed by product and variant; prices
//! are never stored and are resolved against the catalog on every read.

pub mod data;
pub mod errors;
pub mod priced;
pub mod records;
mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use priced::PricedCart;
pub use service::*;
