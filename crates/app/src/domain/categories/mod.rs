//! Categories
//!
//! Categories double as product tags: products reference them by name and
//! unknown names are created on the fly when a product is saved.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CategoriesServiceError;
pub(crate) use repository::PgCategoriesRepository;
pub use service::*;
