//! Current Customer Handlers

pub(crate) mod cashback;
pub(crate) mod order;
pub(crate) mod orders;
pub(crate) mod profile;
