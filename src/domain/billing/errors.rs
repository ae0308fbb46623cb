//! Webhook error types.
//!
//! Status-code mapping drives the provider's retry behavior: forged or
//! malformed deliveries are terminal 400s, storage failures are 500s so the
//! provider redelivers.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur while handling a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Recomputed signature does not match the header.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signed timestamp is older than the acceptable window.
    #[error("Signed timestamp too old")]
    StaleTimestamp,

    /// Signed timestamp is in the future beyond clock-skew tolerance.
    #[error("Signed timestamp in the future")]
    FutureTimestamp,

    /// The signature header could not be parsed.
    #[error("Malformed signature header: {0}")]
    MalformedHeader(String),

    /// The verified payload is not a well-formed event.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// A completed-checkout event carried no customer email.
    #[error("Completed checkout event carries no customer email")]
    MissingEmail,

    /// The entitlement update could not be persisted.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WebhookError {
    /// True if the provider should redeliver this event.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Storage(_))
    }

    /// HTTP status for the webhook response.
    ///
    /// 400 is terminal (the provider stops retrying a rejected delivery);
    /// 500 triggers redelivery.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidSignature
            | WebhookError::StaleTimestamp
            | WebhookError::FutureTimestamp
            | WebhookError::MalformedHeader(_)
            | WebhookError::MalformedPayload(_)
            | WebhookError::MissingEmail => StatusCode::BAD_REQUEST,

            WebhookError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forgery_class_errors_return_400() {
        for err in [
            WebhookError::InvalidSignature,
            WebhookError::StaleTimestamp,
            WebhookError::FutureTimestamp,
            WebhookError::MalformedHeader("no v1".to_string()),
            WebhookError::MalformedPayload("bad json".to_string()),
            WebhookError::MissingEmail,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{err}");
            assert!(!err.is_retryable(), "{err}");
        }
    }

    #[test]
    fn storage_failure_returns_500_and_is_retryable() {
        let err = WebhookError::Storage("connection lost".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_retryable());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            WebhookError::InvalidSignature.to_string(),
            "Invalid signature"
        );
        assert_eq!(
            WebhookError::MalformedPayload("bad json".to_string()).to_string(),
            "Malformed payload: bad json"
        );
    }
}
