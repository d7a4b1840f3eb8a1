//! Store Settings

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::SettingsServiceError;
pub(crate) use repository::PgSettingsRepository;
pub use service::*;
