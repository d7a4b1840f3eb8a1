//! Customer Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::customers::CustomersServiceError;

pub(crate) fn into_status_error(error: CustomersServiceError) -> StatusError {
    match error {
        CustomersServiceError::NotFound => StatusError::not_found().brief("Customer not found"),
        CustomersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Customer already exists")
        }
        CustomersServiceError::MissingRequiredData | CustomersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid customer payload")
        }
        CustomersServiceError::Sql(_) => {
            error!("customer operation failed: {error}");

            StatusError::internal_server_error()
        }
    }
}
