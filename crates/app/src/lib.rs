//! Storefront application services, persistence and upstream gateways.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod gateways;

#[cfg(test)]
mod test;

mod uuids;
