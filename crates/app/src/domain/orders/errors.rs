//! Orders service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use storefront::{cart::CartError, orders::TransitionError, percent::PercentError};
use thiserror::Error;

use crate::domain::settings::SettingsServiceError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("not enough stock for {0}")]
    InsufficientStock(String),

    #[error("cashback balance is lower than the amount applied")]
    InsufficientCashback,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("invalid price value")]
    InvalidPrice(#[from] TryFromIntError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Percent(#[from] PercentError),

    #[error(transparent)]
    Settings(#[from] SettingsServiceError),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use storefront::orders::{Actor, OrderStatus};

    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            OrdersServiceError::from(Error::RowNotFound),
            OrdersServiceError::NotFound
        ));
    }

    #[test]
    fn rejected_transitions_keep_their_reason() {
        let error = OrdersServiceError::from(TransitionError::Forbidden {
            from: OrderStatus::Processing,
            to: OrderStatus::Paid,
            actor: Actor::Admin,
        });

        assert!(matches!(
            error,
            OrdersServiceError::Transition(TransitionError::Forbidden { .. })
        ));
    }
}
