//! Notifications
//!
//! Transactional e-mails sent on behalf of the store. Delivery is best
//! effort: callers log failures and carry on.

pub mod errors;
mod service;
mod templates;

pub use errors::NotificationsError;
pub use service::*;
