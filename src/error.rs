//! Error types for the Subrail billing client.
//!
//! The API surfaces exactly two user-visible error kinds:
//!
//! - [`BillingError::Retry`]: the caller's input (typically payment details)
//!   failed validation, or a transient gateway condition occurred. The caller
//!   may prompt for corrected input and retry the same logical operation.
//! - [`BillingError::Fatal`]: a non-recoverable condition for this call
//!   (missing resource, duplicate id, authorization failure, malformed
//!   request or response). Resubmitting the same request will not help.
//!
//! Transport and codec failures (connection errors, malformed XML) fold into
//! [`BillingError::Fatal`] with a generic diagnostic. "Not found" on a read
//! is represented as an absent result (`Ok(None)`), never an error; only
//! mutating/action calls fail on a missing resource.

use thiserror::Error;

/// Result type alias for billing operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, BillingError>;

/// Errors that can occur when talking to the billing service.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum BillingError {
    /// The request was rejected but can be retried with corrected input.
    ///
    /// Carries zero or more field-level error strings for programmatic
    /// field-level feedback. An empty list with a timeout-style message
    /// indicates a transient gateway condition; resubmitting the same
    /// details later is reasonable.
    #[error("{message}")]
    Retry {
        /// Human-readable summary of the failure.
        message: String,
        /// Per-field validation error messages (possibly empty).
        errors: Vec<String>,
    },

    /// The request failed and must not be blindly retried.
    ///
    /// The message is extracted from the service response where possible
    /// (e.g. "the subscription plan does not exist", "Charge not
    /// authorized"), or is a generic diagnostic for transport/codec
    /// failures.
    #[error("{0}")]
    Fatal(String),
}

impl BillingError {
    /// Creates a retryable error with no field-level detail.
    pub(crate) fn retry(message: impl Into<String>) -> Self {
        Self::Retry { message: message.into(), errors: Vec::new() }
    }

    /// Creates a fatal error from any displayable message.
    pub(crate) fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal(message.into())
    }

    /// Returns true if the caller may retry the operation with corrected
    /// input.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retry { .. })
    }

    /// Returns the field-level validation errors, if any.
    #[must_use]
    pub fn field_errors(&self) -> &[String] {
        match self {
            Self::Retry { errors, .. } => errors,
            Self::Fatal(_) => &[],
        }
    }
}

impl From<reqwest::Error> for BillingError {
    fn from(e: reqwest::Error) -> Self {
        Self::Fatal(format!("HTTP request failed: {e}"))
    }
}

impl From<quick_xml::Error> for BillingError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Fatal(format!("malformed XML response: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_display_uses_message() {
        let error = BillingError::Retry {
            message: "Payment verification failed.".to_owned(),
            errors: vec!["Card number is too short.".to_owned()],
        };
        assert_eq!(error.to_string(), "Payment verification failed.");
    }

    #[test]
    fn test_fatal_display() {
        let error = BillingError::fatal("Charge not authorized");
        assert_eq!(error.to_string(), "Charge not authorized");
    }

    #[test]
    fn test_is_retryable() {
        assert!(BillingError::retry("gateway timed out").is_retryable());
        assert!(!BillingError::fatal("does not exist").is_retryable());
    }

    #[test]
    fn test_field_errors_empty_for_fatal() {
        let error = BillingError::fatal("nope");
        assert!(error.field_errors().is_empty());
    }

    #[test]
    fn test_field_errors_exposed_for_retry() {
        let error = BillingError::Retry {
            message: "Payment verification failed.".to_owned(),
            errors: vec!["a".to_owned(), "b".to_owned()],
        };
        assert_eq!(error.field_errors().len(), 2);
    }
}
