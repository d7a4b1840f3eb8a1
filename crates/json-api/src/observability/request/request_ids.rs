//! Request IDs

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id kept; longer ones are replaced.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Keep a caller's request id when it is safe to log and echo back,
/// otherwise mint a UUID v7.
pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_owned())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
}

pub(super) fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_ids_are_kept() {
        assert_eq!(
            resolve_request_id(Some(" checkout-42 ".to_owned())),
            "checkout-42"
        );
    }

    #[test]
    fn unsafe_ids_are_replaced() {
        let too_long = "x".repeat(MAX_REQUEST_ID_LEN + 1);

        for value in ["", "has space", "line\nbreak", too_long.as_str()] {
            let resolved = resolve_request_id(Some(value.to_owned()));

            assert_ne!(resolved, value.trim());
            assert!(Uuid::parse_str(&resolved).is_ok());
        }
    }

    #[test]
    fn missing_ids_are_generated() {
        assert!(Uuid::parse_str(&resolve_request_id(None)).is_ok());
    }
}
