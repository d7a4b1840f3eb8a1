//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData
        | ProductsServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Pricing(source) => StatusError::bad_request().brief(source.to_string()),
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
