//! Webhook Handlers

pub(crate) mod payments;
