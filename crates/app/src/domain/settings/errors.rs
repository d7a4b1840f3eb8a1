//! Settings service errors.

use sqlx::Error;
use storefront::percent::PercentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsServiceError {
    #[error("invalid percentage")]
    InvalidPercent(#[from] PercentError),

    #[error("invalid origin postal code")]
    InvalidPostalCode,

    #[error("amount out of range")]
    AmountOutOfRange,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SettingsServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
