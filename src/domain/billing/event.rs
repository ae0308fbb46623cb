//! Provider webhook event envelope.
//!
//! Only the fields this service acts on are captured; the rest of the
//! provider's event schema is ignored by serde.

use serde::Deserialize;

use super::errors::WebhookError;

/// A verified webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type string, e.g. "checkout.session.completed".
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the provider created the event.
    pub created: i64,

    /// Event payload containing the affected object.
    pub data: EventData,

    /// Whether this is a live-mode event.
    #[serde(default)]
    pub livemode: bool,
}

/// Container for the event-specific object.
#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    /// Polymorphic payload; concrete shape depends on the event type.
    pub object: serde_json::Value,
}

/// Event types this service distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A hosted checkout finished and was paid.
    CheckoutCompleted,
    /// Anything else; acknowledged and ignored.
    Other,
}

impl ProviderEvent {
    /// Parse the raw JSON bytes of a verified payload.
    pub fn from_payload(payload: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(payload).map_err(|e| WebhookError::MalformedPayload(e.to_string()))
    }

    pub fn kind(&self) -> EventKind {
        match self.event_type.as_str() {
            "checkout.session.completed" => EventKind::CheckoutCompleted,
            _ => EventKind::Other,
        }
    }

    /// Deserialize `data.object` as a checkout session.
    pub fn checkout_session(&self) -> Result<CheckoutSessionObject, WebhookError> {
        serde_json::from_value(self.data.object.clone())
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))
    }
}

/// The checkout-session object inside a completed-checkout event.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    /// Session identifier (cs_...).
    #[serde(default)]
    pub id: Option<String>,

    /// Email the session was created with.
    #[serde(default)]
    pub customer_email: Option<String>,

    /// Details the provider collected during checkout.
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
}

/// Customer details as collected by the hosted checkout page.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
}

impl CheckoutSessionObject {
    /// The email to correlate with a local account.
    ///
    /// The provider fills `customer_email` when the session was created with
    /// one, and `customer_details.email` when the buyer typed it on the
    /// hosted page; either is acceptable.
    pub fn email(&self) -> Option<&str> {
        self.customer_email
            .as_deref()
            .or_else(|| self.customer_details.as_ref().and_then(|d| d.email.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_event() {
        let payload = br#"{
            "id": "evt_1234567890",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": { "object": {} },
            "livemode": false
        }"#;

        let event = ProviderEvent::from_payload(payload).unwrap();

        assert_eq!(event.id, "evt_1234567890");
        assert_eq!(event.kind(), EventKind::CheckoutCompleted);
        assert!(!event.livemode);
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let result = ProviderEvent::from_payload(b"not json");
        assert!(matches!(result, Err(WebhookError::MalformedPayload(_))));
    }

    #[test]
    fn parse_rejects_missing_envelope_fields() {
        let result = ProviderEvent::from_payload(br#"{"id": "evt_1"}"#);
        assert!(matches!(result, Err(WebhookError::MalformedPayload(_))));
    }

    #[test]
    fn unrelated_event_types_are_other() {
        let payload = br#"{
            "id": "evt_inv",
            "type": "invoice.payment_failed",
            "created": 1704067200,
            "data": { "object": {} }
        }"#;

        let event = ProviderEvent::from_payload(payload).unwrap();
        assert_eq!(event.kind(), EventKind::Other);
    }

    #[test]
    fn checkout_session_email_from_customer_email() {
        let payload = br#"{
            "id": "evt_cs",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": { "object": {
                "id": "cs_test_abc",
                "customer_email": "a@example.com"
            } }
        }"#;

        let event = ProviderEvent::from_payload(payload).unwrap();
        let session = event.checkout_session().unwrap();

        assert_eq!(session.email(), Some("a@example.com"));
    }

    #[test]
    fn checkout_session_email_falls_back_to_customer_details() {
        let payload = br#"{
            "id": "evt_cs",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": { "object": {
                "id": "cs_test_abc",
                "customer_details": { "email": "typed@example.com" }
            } }
        }"#;

        let event = ProviderEvent::from_payload(payload).unwrap();
        let session = event.checkout_session().unwrap();

        assert_eq!(session.email(), Some("typed@example.com"));
    }

    #[test]
    fn checkout_session_prefers_customer_email_over_details() {
        let payload = br#"{
            "id": "evt_cs",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": { "object": {
                "customer_email": "account@example.com",
                "customer_details": { "email": "typed@example.com" }
            } }
        }"#;

        let session = ProviderEvent::from_payload(payload)
            .unwrap()
            .checkout_session()
            .unwrap();

        assert_eq!(session.email(), Some("account@example.com"));
    }

    #[test]
    fn checkout_session_without_email_yields_none() {
        let payload = br#"{
            "id": "evt_cs",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": { "object": { "id": "cs_test_abc" } }
        }"#;

        let session = ProviderEvent::from_payload(payload)
            .unwrap()
            .checkout_session()
            .unwrap();

        assert_eq!(session.email(), None);
    }
}
