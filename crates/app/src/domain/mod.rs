//! Storefront Domain Concerns

pub mod carts;
pub mod categories;
pub mod checkout;
pub mod content;
pub mod customers;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod quotes;
pub mod settings;
pub mod shipping_services;
pub mod webhooks;
