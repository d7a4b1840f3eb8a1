//! Shipping Service Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::shipping_services::ShippingServicesServiceError;

pub(crate) fn into_status_error(error: ShippingServicesServiceError) -> StatusError {
    match error {
        ShippingServicesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Shipping service already registered")
        }
        ShippingServicesServiceError::MissingRequiredData
        | ShippingServicesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid shipping service payload")
        }
        ShippingServicesServiceError::NotFound => {
            StatusError::not_found().brief("Shipping service not found")
        }
        ShippingServicesServiceError::Sql(source) => {
            error!("shipping service storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
