//! Storefront
//!
//! Storefront is the pricing, cart and checkout core of a small online shop:
//! effective price resolution, cart aggregation with free-shipping
//! eligibility, shipping quote assembly, cashback-aware checkout totals and
//! the order status lifecycle.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod money;
pub mod orders;
pub mod percent;
pub mod pricing;
pub mod session;
pub mod settings;
pub mod shipping;
pub mod wishlist;
