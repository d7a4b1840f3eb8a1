//! Carts
//!
//! Server-side shopper carts. Lines are keyed by product and variant and
//! are priced against the live catalog on every read.

pub(crate) mod errors;
mod handlers;
pub(crate) mod items;

pub(crate) use handlers::*;
