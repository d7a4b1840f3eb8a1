//! Order Errors

use salvo::http::StatusError;
use storefront::orders::TransitionError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InsufficientStock(_) | OrdersServiceError::InsufficientCashback => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::Transition(TransitionError::Forbidden { .. }) => {
            StatusError::forbidden().brief(error.to_string())
        }
        OrdersServiceError::Transition(TransitionError::Invalid { .. }) => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(_)
        | OrdersServiceError::InvalidPrice(_)
        | OrdersServiceError::Cart(_)
        | OrdersServiceError::Percent(_)
        | OrdersServiceError::Settings(_) => {
            error!("order operation failed: {error}");

            StatusError::internal_server_error()
        }
    }
}
