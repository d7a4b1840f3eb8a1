//! Orders
//!
//! Orders snapshot the cart at checkout. Creation takes stock and spends
//! cashback in the same transaction; every status change goes through
//! [`storefront::orders::authorize_transition`].

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
