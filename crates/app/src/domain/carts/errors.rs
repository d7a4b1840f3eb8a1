//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use storefront::cart::CartError;
use thiserror::Error;

use crate::domain::{
    products::ProductsServiceError, settings::errors::SettingsServiceError,
};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart not found")]
    NotFound,

    #[error("product or variant not found")]
    InvalidReference,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("this product must be added with a variant")]
    VariantRequired,

    #[error("not enough stock")]
    InsufficientStock,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    #[error(transparent)]
    Settings(#[from] SettingsServiceError),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::NotNullViolation | ErrorKind::Other | _)
            | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rows_map_to_not_found() {
        assert!(matches!(
            CartsServiceError::from(Error::RowNotFound),
            CartsServiceError::NotFound
        ));
    }

    #[test]
    fn cart_errors_are_wrapped() {
        assert!(matches!(
            CartsServiceError::from(CartError::InvalidQuantity),
            CartsServiceError::Cart(CartError::InvalidQuantity)
        ));
    }
}
