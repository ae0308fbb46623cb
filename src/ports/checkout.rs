//! Hosted checkout port.
//!
//! The provider, not this service, collects payment details; all this port
//! produces is a redirect target.

use async_trait::async_trait;
use thiserror::Error;

/// Request to open a hosted checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Email of the paying account, prefilled on the hosted page and used
    /// later to correlate the completed-checkout webhook.
    pub customer_email: String,

    /// Pre-provisioned price identifier for the subscription.
    pub price_id: String,

    /// Where the provider sends the browser after payment.
    pub success_url: String,

    /// Where the provider sends the browser on abandonment.
    pub cancel_url: String,
}

/// A hosted checkout session ready for redirect.
#[derive(Debug, Clone)]
pub struct HostedCheckout {
    /// Provider's session identifier (cs_...).
    pub id: String,

    /// Provider-hosted payment page URL.
    pub url: String,
}

/// Errors from the payment provider.
///
/// All variants are recovered locally: the message is surfaced to the user
/// and no state mutates.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider rejected the request (bad price id, auth failure, ...).
    #[error("Payment provider rejected the request: {0}")]
    Rejected(String),

    /// The provider could not be reached or timed out.
    #[error("Payment provider unreachable: {0}")]
    Network(String),

    /// The provider answered with something unparseable.
    #[error("Unexpected payment provider response: {0}")]
    InvalidResponse(String),
}

/// Port for creating hosted checkout sessions.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<HostedCheckout, ProviderError>;
}
