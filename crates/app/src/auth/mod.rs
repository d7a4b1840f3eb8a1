//! Authentication
//!
//! Bearer API tokens. Each token belongs to the back-office or to a single
//! customer; only a digest of its secret is stored.

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
