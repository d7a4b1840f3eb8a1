//! Content Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::content::ContentServiceError;

pub(crate) fn into_status_error(error: ContentServiceError) -> StatusError {
    match error {
        ContentServiceError::NotFound => StatusError::not_found().brief("Content not found"),
        ContentServiceError::AlreadyExists => {
            StatusError::conflict().brief("Content already exists")
        }
        ContentServiceError::MissingRequiredData(field) => {
            StatusError::bad_request().brief(format!("Missing required field: {field}"))
        }
        ContentServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid content payload")
        }
        ContentServiceError::Sql(source) => {
            error!("content storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_fields_are_named_in_the_response() {
        let error = into_status_error(ContentServiceError::MissingRequiredData("image_url"));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert!(error.brief.contains("image_url"));
    }

    #[test]
    fn storage_errors_are_internal() {
        let error = into_status_error(ContentServiceError::Sql(sqlx::Error::PoolClosed));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
