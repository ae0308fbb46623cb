//! Stripe hosted-checkout client.
//!
//! Talks to the Stripe REST API with form-encoded requests and the secret
//! key as basic auth. Card data never touches this service; Stripe hosts
//! the payment page and we only redirect to it.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::config::PaymentConfig;
use crate::ports::{CheckoutProvider, CheckoutRequest, HostedCheckout, ProviderError};

/// Stripe implementation of [`CheckoutProvider`].
pub struct StripeCheckoutClient {
    api_key: SecretString,
    api_base_url: String,
    http_client: reqwest::Client,
}

/// Stripe's checkout-session resource, reduced to what we use.
#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    /// Hosted payment page URL. Stripe returns it on creation.
    url: Option<String>,
}

/// Stripe error envelope: `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl StripeCheckoutClient {
    /// Build a client from payment configuration.
    ///
    /// The HTTP client carries an explicit timeout so a slow provider can
    /// never hang a request handler.
    pub fn new(config: &PaymentConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .expect("reqwest client construction only fails on TLS backend misconfiguration");

        Self {
            api_key: config.stripe_api_key.clone(),
            api_base_url: config.api_base_url.clone(),
            http_client,
        }
    }

    /// Extract a human-readable message from a Stripe error response body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<StripeErrorEnvelope>(body)
            .ok()
            .and_then(|e| e.error.message)
            .unwrap_or_else(|| body.to_string())
    }
}

#[async_trait]
impl CheckoutProvider for StripeCheckoutClient {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<HostedCheckout, ProviderError> {
        let url = format!("{}/v1/checkout/sessions", self.api_base_url);

        let params = [
            ("mode", "subscription".to_string()),
            ("customer_email", request.customer_email),
            ("line_items[0][price]", request.price_id),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
            ("allow_promotion_codes", "true".to_string()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = Self::error_message(&body);
            tracing::error!(error = %message, "checkout session creation rejected");
            return Err(ProviderError::Rejected(message));
        }

        let session: StripeCheckoutSession = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let redirect = session
            .url
            .ok_or_else(|| ProviderError::InvalidResponse("session has no URL".to_string()))?;

        tracing::info!(session_id = %session.id, "checkout session created");

        Ok(HostedCheckout {
            id: session.id,
            url: redirect,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PaymentConfig {
        PaymentConfig {
            stripe_api_key: SecretString::new("sk_test_key".to_string()),
            stripe_webhook_secret: SecretString::new("whsec_test".to_string()),
            premium_price_id: "price_pro".to_string(),
            success_url: "https://cockpit.example.com/checkout/success".to_string(),
            cancel_url: "https://cockpit.example.com/premium".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn client_builds_from_config() {
        let client = StripeCheckoutClient::new(&test_config());
        assert_eq!(client.api_base_url, "https://api.stripe.com");
    }

    #[test]
    fn error_message_reads_stripe_envelope() {
        let body = r#"{"error":{"message":"No such price: 'price_missing'","type":"invalid_request_error"}}"#;
        assert_eq!(
            StripeCheckoutClient::error_message(body),
            "No such price: 'price_missing'"
        );
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(
            StripeCheckoutClient::error_message("upstream exploded"),
            "upstream exploded"
        );
    }

    #[test]
    fn checkout_session_parses_with_and_without_url() {
        let with_url: StripeCheckoutSession = serde_json::from_str(
            r#"{"id":"cs_test_1","url":"https://checkout.stripe.com/c/pay/cs_test_1"}"#,
        )
        .unwrap();
        assert!(with_url.url.is_some());

        let without_url: StripeCheckoutSession =
            serde_json::from_str(r#"{"id":"cs_test_2","url":null}"#).unwrap();
        assert!(without_url.url.is_none());
    }
}
