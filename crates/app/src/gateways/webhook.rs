//! Payment webhook verification.
//!
//! The processor signs each delivery with a header of the form
//! `t=<unix seconds>,v1=<hex hmac>[,v1=<hex hmac>...]` where the HMAC-SHA256
//! is computed with the endpoint secret over `"<t>.<raw body>"`.

use hmac::{Hmac, Mac};
use jiff::Timestamp;
use serde::Deserialize;
use sha2::Sha256;
use smallvec::SmallVec;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Event type that confirms a hosted checkout was paid.
pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

/// Reasons a webhook delivery is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("missing signature")]
    MissingSignature,

    #[error("malformed signature header")]
    MalformedHeader,

    #[error("signature timestamp outside the tolerance window")]
    StaleTimestamp,

    #[error("no signature matches the payload")]
    SignatureMismatch,

    #[error("invalid event payload: {0}")]
    InvalidPayload(String),

    #[error("completed checkout without an order id")]
    MissingOrderId,
}

/// Check `header` against `payload` and the endpoint `secret`.
///
/// # Errors
///
/// - [`WebhookError::MalformedHeader`]: no timestamp or no `v1` signature.
/// - [`WebhookError::StaleTimestamp`]: the timestamp is further than
///   `tolerance_seconds` from `now`.
/// - [`WebhookError::SignatureMismatch`]: no `v1` signature matches.
pub fn verify_webhook(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_seconds: i64,
    now: Timestamp,
) -> Result<(), WebhookError> {
    let mut timestamp = None;
    let mut signatures: SmallVec<[Vec<u8>; 2]> = SmallVec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            return Err(WebhookError::MalformedHeader);
        };

        match key {
            "t" => {
                timestamp = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_not_a_number| WebhookError::MalformedHeader)?,
                );
            }
            "v1" => {
                if let Ok(signature) = hex::decode(value) {
                    signatures.push(signature);
                }
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(WebhookError::MalformedHeader)?;

    if signatures.is_empty() {
        return Err(WebhookError::MalformedHeader);
    }

    let tolerance = u64::try_from(tolerance_seconds).unwrap_or(0);

    let within_tolerance = now
        .as_second()
        .checked_sub(timestamp)
        .map(i64::unsigned_abs)
        .is_some_and(|skew| skew <= tolerance);

    if !within_tolerance {
        return Err(WebhookError::StaleTimestamp);
    }

    let matches = signatures.iter().any(|signature| {
        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };

        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);

        mac.verify_slice(signature).is_ok()
    });

    if !matches {
        return Err(WebhookError::SignatureMismatch);
    }

    Ok(())
}

/// A verified payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedCheckout {
    /// Processor session identifier
    pub session_id: String,

    /// Order identifier from the session metadata
    pub order_id: String,
}

#[derive(Debug, Deserialize)]
struct Event {
    #[serde(rename = "type")]
    kind: String,
    data: EventData,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: SessionObject,
}

#[derive(Debug, Deserialize)]
struct SessionObject {
    id: String,
    #[serde(default)]
    metadata: Option<SessionMetadata>,
}

#[derive(Debug, Deserialize)]
struct SessionMetadata {
    #[serde(default)]
    order_id: Option<String>,
}

/// Extract the completed checkout from a verified payload. Other event types
/// yield `None`.
///
/// # Errors
///
/// - [`WebhookError::InvalidPayload`]: the body is not an event.
/// - [`WebhookError::MissingOrderId`]: a completed checkout lacks
///   `metadata.order_id`.
pub fn parse_event(payload: &[u8]) -> Result<Option<CompletedCheckout>, WebhookError> {
    let value: serde_json::Value = serde_json::from_slice(payload)
        .map_err(|error| WebhookError::InvalidPayload(error.to_string()))?;

    let is_completed = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|kind| kind == CHECKOUT_COMPLETED);

    if !is_completed {
        return Ok(None);
    }

    let event: Event = serde_json::from_value(value)
        .map_err(|error| WebhookError::InvalidPayload(error.to_string()))?;

    debug_assert_eq!(event.kind, CHECKOUT_COMPLETED);

    let order_id = event
        .data
        .object
        .metadata
        .and_then(|metadata| metadata.order_id)
        .filter(|order_id| !order_id.trim().is_empty())
        .ok_or(WebhookError::MissingOrderId)?;

    Ok(Some(CompletedCheckout {
        session_id: event.data.object.id,
        order_id,
    }))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const PAYLOAD: &[u8] = br#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_test_1","metadata":{"order_id":"0190a0b2-0000-7000-8000-000000000001"}}}}"#;

    fn sign(timestamp: i64, payload: &[u8], secret: &str) -> TestResult<String> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;

        mac.update(format!("{timestamp}.").as_bytes());
        mac.update(payload);

        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn now() -> TestResult<Timestamp> {
        Ok(Timestamp::from_second(1_767_225_600)?)
    }

    #[test]
    fn accepts_a_valid_signature() -> TestResult {
        let now = now()?;
        let t = now.as_second();
        let header = format!("t={t},v1={}", sign(t, PAYLOAD, SECRET)?);

        verify_webhook(PAYLOAD, &header, SECRET, 300, now)?;

        Ok(())
    }

    #[test]
    fn accepts_when_any_v1_signature_matches() -> TestResult {
        let now = now()?;
        let t = now.as_second();
        let header = format!(
            "t={t},v1={},v0=ignored,v1={}",
            sign(t, PAYLOAD, "rotated_secret")?,
            sign(t, PAYLOAD, SECRET)?
        );

        verify_webhook(PAYLOAD, &header, SECRET, 300, now)?;

        Ok(())
    }

    #[test]
    fn rejects_a_tampered_payload() -> TestResult {
        let now = now()?;
        let t = now.as_second();
        let header = format!("t={t},v1={}", sign(t, PAYLOAD, SECRET)?);

        assert_eq!(
            verify_webhook(b"{\"type\":\"other\"}", &header, SECRET, 300, now),
            Err(WebhookError::SignatureMismatch)
        );

        Ok(())
    }

    #[test]
    fn rejects_stale_deliveries() -> TestResult {
        let now = now()?;
        let t = now.as_second() - 301;
        let header = format!("t={t},v1={}", sign(t, PAYLOAD, SECRET)?);

        assert_eq!(
            verify_webhook(PAYLOAD, &header, SECRET, 300, now),
            Err(WebhookError::StaleTimestamp)
        );

        Ok(())
    }

    #[test]
    fn rejects_timestamps_at_the_integer_limits() -> TestResult {
        let now = now()?;

        for t in [i64::MIN, i64::MAX] {
            let header = format!("t={t},v1={}", sign(t, PAYLOAD, SECRET)?);

            assert_eq!(
                verify_webhook(PAYLOAD, &header, SECRET, 300, now),
                Err(WebhookError::StaleTimestamp),
                "timestamp {t}"
            );
        }

        Ok(())
    }

    #[test]
    fn negative_tolerance_only_accepts_the_current_second() -> TestResult {
        let now = now()?;
        let t = now.as_second();
        let header = format!("t={t},v1={}", sign(t, PAYLOAD, SECRET)?);

        verify_webhook(PAYLOAD, &header, SECRET, -5, now)?;

        Ok(())
    }

    #[test]
    fn rejects_malformed_headers() -> TestResult {
        let now = now()?;

        for header in ["", "v1=abcd", "t=abc,v1=abcd", "t=1767225600", "garbage"] {
            assert_eq!(
                verify_webhook(PAYLOAD, header, SECRET, 300, now),
                Err(WebhookError::MalformedHeader),
                "header {header:?}"
            );
        }

        Ok(())
    }

    #[test]
    fn extracts_completed_checkouts() -> TestResult {
        let completed = parse_event(PAYLOAD)?;

        assert_eq!(
            completed,
            Some(CompletedCheckout {
                session_id: "cs_test_1".to_owned(),
                order_id: "0190a0b2-0000-7000-8000-000000000001".to_owned(),
            })
        );

        Ok(())
    }

    #[test]
    fn ignores_other_event_types() -> TestResult {
        let payload = br#"{"type":"payment_intent.created","data":{"object":{"id":"pi_1"}}}"#;

        assert_eq!(parse_event(payload)?, None);

        Ok(())
    }

    #[test]
    fn completed_checkout_requires_an_order_id() {
        let payload = br#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_1","metadata":{}}}}"#;

        assert_eq!(parse_event(payload), Err(WebhookError::MissingOrderId));
    }
}
