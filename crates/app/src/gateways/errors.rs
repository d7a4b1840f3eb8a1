//! Gateway errors.

use thiserror::Error;

/// Errors that can occur when calling an upstream service.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream service returned a non-2xx response or an unexpected body.
    #[error("{0}")]
    UnexpectedResponse(String),
}

/// Best message to surface for a failed upstream call: the body's `error`
/// or `message` field, then its `errors` object, then the status alone.
pub(crate) fn upstream_message(status: reqwest::StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();

    let field = parsed.as_ref().and_then(|value| {
        value
            .get("error")
            .and_then(|error| error.get("message").or(Some(error)))
            .or_else(|| value.get("message"))
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned)
            .or_else(|| value.get("errors").map(ToString::to_string))
    });

    field.unwrap_or_else(|| format!("upstream request failed with status {status}"))
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn prefers_the_error_field() {
        assert_eq!(
            upstream_message(StatusCode::BAD_REQUEST, r#"{"error":"CEP de destino inválido"}"#),
            "CEP de destino inválido"
        );
    }

    #[test]
    fn reads_nested_error_messages() {
        assert_eq!(
            upstream_message(
                StatusCode::PAYMENT_REQUIRED,
                r#"{"error":{"message":"Your card was declined.","type":"card_error"}}"#
            ),
            "Your card was declined."
        );
    }

    #[test]
    fn falls_back_to_the_errors_object() {
        assert_eq!(
            upstream_message(StatusCode::UNPROCESSABLE_ENTITY, r#"{"errors":{"to":["required"]}}"#),
            r#"{"to":["required"]}"#
        );
    }

    #[test]
    fn falls_back_to_the_status() {
        assert_eq!(
            upstream_message(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            "upstream request failed with status 502 Bad Gateway"
        );
    }
}
