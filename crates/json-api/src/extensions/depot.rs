//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use storefront_app::{auth::Principal, domain::customers::records::CustomerUuid};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_principal(&mut self, principal: Principal);

    /// The authenticated caller.
    fn principal_or_401(&self) -> Result<Principal, StatusError>;

    /// The authenticated shopper; staff tokens do not act for a customer.
    fn customer_or_403(&self) -> Result<CustomerUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<Principal, StatusError> {
        self.obtain::<Principal>()
            .copied()
            .map_err(|_missing| StatusError::unauthorized())
    }

    fn customer_or_403(&self) -> Result<CustomerUuid, StatusError> {
        self.principal_or_401()?
            .customer()
            .ok_or_else(|| StatusError::forbidden().brief("A customer token is required"))
    }
}
