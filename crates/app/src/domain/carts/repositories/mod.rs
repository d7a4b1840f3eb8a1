//! Cart Repositories
//!
//! Carts are soft-deleted; their items are unique per product and variant
//! and are removed outright.

mod carts;
mod items;

pub(crate) use carts::PgCartsRepository;
pub(crate) use items::PgCartItemsRepository;
