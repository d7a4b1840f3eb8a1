//! Customers
//!
//! Customer profiles and their cashback ledger. The balance column is the
//! running sum of the ledger and is only changed together with an entry.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CustomersServiceError;
pub(crate) use repository::PgCustomersRepository;
pub use service::*;
