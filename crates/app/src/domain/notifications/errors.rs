//! Notification errors.

use thiserror::Error;

use crate::gateways::GatewayError;

#[derive(Debug, Error)]
pub enum NotificationsError {
    #[error("store has no contact e-mail configured")]
    MissingContactEmail,

    #[error("e-mail delivery failed")]
    Delivery(#[from] GatewayError),
}
