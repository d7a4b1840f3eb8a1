//! Payment Webhooks

mod errors;
mod handlers;

pub(crate) use handlers::*;
