//! Settings Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::settings::SettingsServiceError;

pub(crate) fn into_status_error(error: SettingsServiceError) -> StatusError {
    match error {
        SettingsServiceError::InvalidPercent(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        SettingsServiceError::InvalidPostalCode => {
            StatusError::bad_request().brief("Origin postal code must have 8 digits")
        }
        SettingsServiceError::AmountOutOfRange => {
            StatusError::bad_request().brief("Free shipping threshold is out of range")
        }
        SettingsServiceError::Sql(source) => {
            error!("settings storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
