//! Response classification.
//!
//! Turns a raw `(status, body)` pair into one of three outcomes: the parsed
//! body on success, [`BillingError::Retry`] for conditions the caller can
//! fix or wait out, or [`BillingError::Fatal`] for everything else.
//!
//! Decision table:
//!
//! | condition | outcome |
//! |---|---|
//! | 2xx | parsed body (a 2xx body rooted at `error` is still fatal) |
//! | 422 with per-field `<errors><error>…</error></errors>` | `Retry` with the field list |
//! | 422 otherwise | `Retry`, empty list, gateway-timeout style message |
//! | any other non-2xx | `Fatal` with the message extracted from the body |
//! | non-2xx with empty/malformed body | `Fatal` with a generic status message |

use tracing::{debug, warn};

use crate::error::{BillingError, Result};
use crate::xml::{decode, XmlValue};

/// Summary attached to a retryable failure that carries field errors.
///
/// The only 422 responses with per-field detail this API produces are
/// payment validation failures.
pub(crate) const PAYMENT_VALIDATION_MESSAGE: &str = "Payment verification failed.";

/// Summary attached to a retryable failure with no field detail.
pub(crate) const GATEWAY_TIMEOUT_MESSAGE: &str =
    "The payment gateway timed out. Please resubmit your payment details.";

/// Classifies one response per the decision table above.
///
/// # Errors
///
/// Returns [`BillingError::Retry`] or [`BillingError::Fatal`] as described
/// in the module documentation.
pub fn classify(status: u16, raw_body: &str) -> Result<XmlValue> {
    if (200..300).contains(&status) {
        let parsed = decode(raw_body)?;
        if parsed.root_name() == Some("error") {
            let message = parsed
                .child_text("error")
                .unwrap_or("service reported an unspecified error")
                .to_owned();
            warn!(status, %message, "error body inside successful response");
            return Err(BillingError::fatal(message));
        }
        return Ok(parsed);
    }

    if status == 422 {
        let errors = field_errors(raw_body);
        if errors.is_empty() {
            let message = plain_message(raw_body)
                .unwrap_or_else(|| GATEWAY_TIMEOUT_MESSAGE.to_owned());
            debug!(status, "retryable response without field errors");
            return Err(BillingError::retry(message));
        }
        debug!(status, count = errors.len(), "retryable validation response");
        return Err(BillingError::Retry {
            message: PAYMENT_VALIDATION_MESSAGE.to_owned(),
            errors,
        });
    }

    let message = plain_message(raw_body)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    warn!(status, %message, "fatal response");
    Err(BillingError::fatal(message))
}

/// Extracts the `<errors><error>…</error></errors>` list, if present.
fn field_errors(raw_body: &str) -> Vec<String> {
    let Ok(parsed) = decode(raw_body) else {
        return Vec::new();
    };
    let Some(errors) = parsed.get("errors") else {
        return Vec::new();
    };
    errors
        .get_all("error")
        .into_iter()
        .filter_map(XmlValue::text)
        .map(str::to_owned)
        .collect()
}

/// Best-effort extraction of a human-readable message from an error body.
///
/// Prefers the text of an `error` element; falls back to the trimmed raw
/// body. Returns `None` for empty or unusable bodies.
fn plain_message(raw_body: &str) -> Option<String> {
    if let Ok(parsed) = decode(raw_body) {
        if let Some(text) = parsed.child_text("error") {
            return Some(text.to_owned());
        }
        // Some endpoints wrap the message one level down, e.g.
        // <errors><error>…</error></errors> with a single entry.
        if let Some(errors) = parsed.get("errors") {
            if let Some(first) = errors.get("error").and_then(XmlValue::text) {
                return Some(first.to_owned());
            }
        }
    }
    let trimmed = raw_body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_returns_parsed_body() {
        let parsed = classify(200, "<subscriber><customer_id>joe</customer_id></subscriber>")
            .unwrap();
        assert_eq!(
            parsed.get("subscriber").unwrap().child_text("customer_id"),
            Some("joe")
        );
    }

    #[test]
    fn test_success_with_empty_body() {
        assert_eq!(classify(200, "").unwrap(), XmlValue::Nil);
    }

    #[test]
    fn test_success_with_embedded_error_element_is_fatal() {
        let result = classify(200, "<error>Charge not authorized</error>");
        let err = result.unwrap_err();
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("Charge not authorized"));
    }

    #[test]
    fn test_422_with_field_errors_is_retryable() {
        let body = "<errors><error>Card number is too short.</error>\
                    <error>Expiration year is invalid.</error></errors>";
        let err = classify(422, body).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.field_errors().len(), 2);
        assert_eq!(err.to_string(), "Payment verification failed.");
    }

    #[test]
    fn test_422_without_field_errors_is_retryable_timeout() {
        let err = classify(422, "<errors/>").unwrap_err();
        assert!(err.is_retryable());
        assert!(err.field_errors().is_empty());
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_422_with_plain_text_body_keeps_message() {
        let err = classify(422, "gateway temporarily unavailable").unwrap_err();
        assert!(err.is_retryable());
        assert!(err.field_errors().is_empty());
        assert_eq!(err.to_string(), "gateway temporarily unavailable");
    }

    #[test]
    fn test_404_with_plain_body_is_fatal_with_body_message() {
        let err = classify(404, "this subscriber does not exist").unwrap_err();
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "this subscriber does not exist");
    }

    #[test]
    fn test_403_with_error_element() {
        let err = classify(403, "<error>Subscriber already exists</error>").unwrap_err();
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("exists"));
    }

    #[test]
    fn test_non_2xx_with_empty_body_is_generic_fatal() {
        let err = classify(500, "").unwrap_err();
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_malformed_success_body_is_fatal() {
        let result = classify(200, "<subscriber><id>1</id>");
        assert!(!result.unwrap_err().is_retryable());
    }
}
