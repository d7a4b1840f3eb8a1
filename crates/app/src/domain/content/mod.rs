//! Storefront Content
//!
//! Back-office managed presentation content: home page slides, the
//! promotional pop-up, footer social links and per-page headers.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::ContentServiceError;
pub(crate) use repository::PgContentRepository;
pub use service::*;
